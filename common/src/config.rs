//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs.

/// デフォルトのROFLアプリケーションID
pub const DEFAULT_APP_ID: &str = "rofl1qpuexjnfplvvwzdcm9vajanphs8mfzp9sqw9yz87";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The deprecated environment variable name (fallback)
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The deprecated environment variable name (fallback)
/// * `default` - The default value to return if neither is set
///
/// # Returns
/// The environment variable value or the default
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The deprecated environment variable name (fallback)
/// * `default` - The default value to return if neither is set or parsing fails
///
/// # Returns
/// The parsed environment variable value or the default
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// アプリケーションIDを取得
///
/// 環境変数 `ROFL_LOGGER_APP_ID`（旧: `ROFL_APP_ID`）から取得し、
/// 未設定の場合は既定のアプリIDを返す。
pub fn get_app_id() -> String {
    get_env_with_fallback_or("ROFL_LOGGER_APP_ID", "ROFL_APP_ID", DEFAULT_APP_ID)
}

/// 本番ランタイムモードの有効/無効を取得
///
/// 環境変数 `ROFL_LOGGER_RUNTIME`（旧: `OASIS_ROFL_RUNTIME`）が
/// `true/1/yes/on` のときに有効化する。未設定ならモックバックエンド。
pub fn is_production_runtime() -> bool {
    get_env_with_fallback("ROFL_LOGGER_RUNTIME", "OASIS_ROFL_RUNTIME")
        .map(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}
