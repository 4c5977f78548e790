//! 署名コーデック
//!
//! ペイロードを決定的に正規化し、SHA-256ダイジェストをbase64文字列として
//! エンコードする。秘密鍵素材を持たないため真の署名（否認防止）では
//! なく、両端が同じ計算を行う前提でのペイロード完全性チェックである。
//! 認可の境界はあくまでバックエンドの許可リスト判定。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// ペイロードを正規化JSONに変換する
///
/// すべてのオブジェクトのキーを辞書順に再帰的にソートし、コンパクトな
/// JSON文字列として直列化する。構築順が異なっても論理的に等しい
/// ペイロードは必ず同一のバイト列になる。
///
/// # Arguments
/// * `value` - 正規化するJSON値
///
/// # Returns
/// * `String` - 正規化済みJSON文字列
pub fn canonicalize(value: &Value) -> String {
    canonical_value(value).to_string()
}

/// キーをソートした同値のJSON値を構築する
///
/// `serde_json::Map`は挿入順を保持するため、辞書順で挿入し直すことで
/// 直列化結果が決定的になる。
fn canonical_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonical_value(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical_value).collect()),
        other => other.clone(),
    }
}

/// 署名文字列を計算する
///
/// `{"app_id": .., "origin": .., "data": ..}` を正規化し、SHA-256で
/// ハッシュしてbase64エンコードする。純粋関数であり、等しい入力は常に
/// 等しい44文字の出力を返す。タイムスタンプは署名対象に含まれない
/// （鮮度チェックはゲートウェイが別途行う）。
///
/// # Arguments
/// * `app_id` - アプリケーションID
/// * `origin` - 送信元オリジン
/// * `data` - 署名対象のペイロード
///
/// # Returns
/// * `String` - base64エンコード済み署名（44文字）
pub fn sign(app_id: &str, origin: &str, data: &Value) -> String {
    let payload = serde_json::json!({
        "app_id": app_id,
        "origin": origin,
        "data": data,
    });

    let canonical = canonicalize(&payload);
    let digest = Sha256::digest(canonical.as_bytes());
    STANDARD.encode(digest)
}

/// 2つの署名文字列を定数時間で比較する
///
/// タイミングサイドチャネルを避けるため`subtle::ConstantTimeEq`を使う。
/// 署名長は公開情報（ダイジェスト長で固定）なので長さ差の早期リターンは
/// 問題にならない。
pub fn signatures_match(received: &str, expected: &str) -> bool {
    received.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_APP_ID: &str = "rofl1qpuexjnfplvvwzdcm9vajanphs8mfzp9sqw9yz87";
    const TEST_ORIGIN: &str = "oasis1qz88379wfzvs2nug7f5jl08ap9hmuyvj9g57f5vk";

    #[test]
    fn canonicalize_sorts_keys_recursively() {
        let a = json!({"b": 1, "a": {"d": 2, "c": 3}});
        let b = json!({"a": {"c": 3, "d": 2}, "b": 1});
        assert_eq!(canonicalize(&a), canonicalize(&b));
        assert_eq!(canonicalize(&a), r#"{"a":{"c":3,"d":2},"b":1}"#);
    }

    #[test]
    fn canonicalize_preserves_array_order() {
        let value = json!({"items": [3, 1, 2]});
        assert_eq!(canonicalize(&value), r#"{"items":[3,1,2]}"#);
    }

    #[test]
    fn sign_is_deterministic() {
        let data = json!({"user": "alice", "question": "q", "answer": "a"});
        let first = sign(TEST_APP_ID, TEST_ORIGIN, &data);
        let second = sign(TEST_APP_ID, TEST_ORIGIN, &data);
        assert_eq!(first, second);
    }

    #[test]
    fn sign_output_is_fixed_length_base64() {
        let data = json!({"user": "alice"});
        let signature = sign(TEST_APP_ID, TEST_ORIGIN, &data);
        // SHA-256のbase64表現は44文字
        assert_eq!(signature.len(), 44);
        assert!(STANDARD.decode(&signature).is_ok());
    }

    #[test]
    fn sign_is_independent_of_key_order() {
        let a = json!({"user": "alice", "question": "q", "answer": "a"});
        let b = json!({"answer": "a", "user": "alice", "question": "q"});
        assert_eq!(sign(TEST_APP_ID, TEST_ORIGIN, &a), sign(TEST_APP_ID, TEST_ORIGIN, &b));
    }

    #[test]
    fn sign_differs_for_different_origin() {
        let data = json!({"user": "alice"});
        let sig_a = sign(TEST_APP_ID, TEST_ORIGIN, &data);
        let sig_b = sign(TEST_APP_ID, "oasis1other", &data);
        assert_ne!(sig_a, sig_b);
    }

    #[test]
    fn sign_differs_for_different_payload() {
        let sig_a = sign(TEST_APP_ID, TEST_ORIGIN, &json!({"user": "alice"}));
        let sig_b = sign(TEST_APP_ID, TEST_ORIGIN, &json!({"user": "bob"}));
        assert_ne!(sig_a, sig_b);
    }

    #[test]
    fn signatures_match_detects_single_byte_tampering() {
        let data = json!({"user": "alice"});
        let signature = sign(TEST_APP_ID, TEST_ORIGIN, &data);

        let mut tampered = signature.clone().into_bytes();
        tampered[0] = if tampered[0] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(signatures_match(&signature, &signature));
        assert!(!signatures_match(&tampered, &signature));
    }

    #[test]
    fn signatures_match_rejects_length_mismatch() {
        assert!(!signatures_match("abc", "abcd"));
    }
}
