//! オリジン認証
//!
//! アプリケーションIDを保持し、送信用エンベロープの構築と受信署名の
//! 検証を行う。

use crate::error::CommonError;
use crate::protocol::{HEADER_APP_ID, HEADER_ORIGIN, HEADER_SIGNATURE, HEADER_TIMESTAMP};
use crate::signature;
use crate::types::AuthEnvelope;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// オリジン認証ハンドラー
///
/// クライアント側ではエンベロープ構築、サーバー側では署名検証に使う。
#[derive(Debug, Clone)]
pub struct OriginAuthenticator {
    app_id: String,
}

impl OriginAuthenticator {
    /// 新しいOriginAuthenticatorを作成
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }

    /// アプリケーションIDを返す
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// 送信用の認証エンベロープを構築する
    ///
    /// タイムスタンプは現在時刻（Unix秒）。ペイロードのJSON変換に
    /// 失敗した場合は`CommonError::Encoding`を返し、握りつぶさない。
    ///
    /// # Arguments
    /// * `origin` - 送信元オリジン
    /// * `payload` - 署名対象のペイロード
    ///
    /// # Returns
    /// * `Ok(AuthEnvelope)` - ヘッダー送信可能なエンベロープ
    /// * `Err(CommonError)` - ペイロードが直列化できない
    pub fn create_envelope<T: Serialize>(
        &self,
        origin: &str,
        payload: &T,
    ) -> Result<AuthEnvelope, CommonError> {
        let payload = serde_json::to_value(payload)?;
        let signature = signature::sign(&self.app_id, origin, &payload);

        Ok(AuthEnvelope {
            origin: origin.to_string(),
            signature,
            timestamp: Utc::now().timestamp(),
            app_id: self.app_id.clone(),
            payload,
        })
    }

    /// 受信した署名を検証する
    ///
    /// 期待値を再計算し、定数時間比較で突き合わせる。不一致は想定内の
    /// 結果なのでエラーではなく`false`を返す。
    ///
    /// # Arguments
    /// * `origin` - 申告されたオリジン
    /// * `received_signature` - 受信した署名
    /// * `payload` - 受信したペイロード
    ///
    /// # Returns
    /// * `bool` - 完全一致した場合のみtrue
    pub fn verify(&self, origin: &str, received_signature: &str, payload: &Value) -> bool {
        let expected = signature::sign(&self.app_id, origin, payload);
        signature::signatures_match(received_signature, &expected)
    }
}

impl AuthEnvelope {
    /// 送信ヘッダーのキー・値ペアを返す
    pub fn header_pairs(&self) -> [(&'static str, String); 4] {
        [
            (HEADER_ORIGIN, self.origin.clone()),
            (HEADER_SIGNATURE, self.signature.clone()),
            (HEADER_TIMESTAMP, self.timestamp.to_string()),
            (HEADER_APP_ID, self.app_id.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_APP_ID: &str = "rofl1qpuexjnfplvvwzdcm9vajanphs8mfzp9sqw9yz87";
    const TEST_ORIGIN: &str = "oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk";

    #[test]
    fn round_trip_verify_succeeds() {
        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let payload = json!({"user": "alice", "question": "q", "answer": "a"});

        let envelope = auth.create_envelope(TEST_ORIGIN, &payload).unwrap();

        assert!(auth.verify(TEST_ORIGIN, &envelope.signature, &payload));
    }

    #[test]
    fn verify_fails_for_wrong_origin() {
        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let payload = json!({"user": "alice"});
        let envelope = auth.create_envelope(TEST_ORIGIN, &payload).unwrap();

        assert!(!auth.verify("oasis1other", &envelope.signature, &payload));
    }

    #[test]
    fn verify_fails_for_modified_payload() {
        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let payload = json!({"user": "alice"});
        let envelope = auth.create_envelope(TEST_ORIGIN, &payload).unwrap();

        let modified = json!({"user": "mallory"});
        assert!(!auth.verify(TEST_ORIGIN, &envelope.signature, &modified));
    }

    #[test]
    fn envelope_carries_all_four_headers() {
        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let envelope = auth
            .create_envelope(TEST_ORIGIN, &json!({"user": "alice"}))
            .unwrap();

        let headers = envelope.header_pairs();
        let names: Vec<&str> = headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "X-ROFL-Origin",
                "X-ROFL-Signature",
                "X-ROFL-Timestamp",
                "X-ROFL-App-ID"
            ]
        );
        assert_eq!(headers[0].1, TEST_ORIGIN);
        assert_eq!(headers[3].1, TEST_APP_ID);
    }

    #[test]
    fn envelope_timestamp_is_current() {
        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let before = Utc::now().timestamp();
        let envelope = auth
            .create_envelope(TEST_ORIGIN, &json!({"user": "alice"}))
            .unwrap();
        let after = Utc::now().timestamp();

        assert!(envelope.timestamp >= before && envelope.timestamp <= after);
    }

    #[test]
    fn create_envelope_rejects_unserializable_payload() {
        #[derive(Serialize)]
        struct BadKey(std::collections::HashMap<Vec<u8>, String>);

        let mut map = std::collections::HashMap::new();
        map.insert(vec![0u8], "value".to_string());

        let auth = OriginAuthenticator::new(TEST_APP_ID);
        let result = auth.create_envelope(TEST_ORIGIN, &BadKey(map));
        assert!(matches!(result, Err(CommonError::Encoding(_))));
    }
}
