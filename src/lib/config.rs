//! Build-time configuration for the API and auth endpoints with an optional
//! runtime override. The runtime config is read from `window.TASKDESK_CONFIG`
//! (if present) so static deployments can change endpoints without rebuilding.
//! Configuration values are public; do not store secrets here.

use tracing::Level;

/// API base used when nothing is configured at build or run time.
pub const DEFAULT_API_BASE_URL: &str = "https://tasksbackend.rdexperts.tech/api";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::from_build_env(
            option_env!("TASKDESK_API_URL"),
            option_env!("TASKDESK_AUTH_URL"),
            option_env!("TASKDESK_LOG_LEVEL"),
        );

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env(api: Option<&str>, auth: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        // Auth endpoints live under the API base unless a dedicated host is set.
        let auth_base_url = auth
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| api_base_url.clone());
        let log_level = log_level
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| "info".to_string());

        Self {
            api_base_url,
            auth_base_url,
            log_level,
        }
    }

    /// Parsed log level, falling back to `INFO` on anything unrecognized.
    #[must_use]
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    auth_base_url: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.auth_base_url {
        config.auth_base_url = value;
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("TASKDESK_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        auth_base_url: read_runtime_value(&object, "auth_base_url"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, DEFAULT_API_BASE_URL, RuntimeConfig, apply_runtime_overrides,
        normalize_runtime_value,
    };
    use tracing::Level;

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.taskdesk.dev "),
            Some("https://api.taskdesk.dev".to_string())
        );
    }

    #[test]
    fn build_env_defaults_auth_to_api_base() {
        let config = AppConfig::from_build_env(Some("https://api.example/api"), None, None);
        assert_eq!(config.api_base_url, "https://api.example/api");
        assert_eq!(config.auth_base_url, "https://api.example/api");
        assert_eq!(config.log_level(), Level::INFO);

        let config = AppConfig::from_build_env(None, Some(" "), Some("debug"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.auth_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_level(), Level::DEBUG);
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            auth_base_url: "https://auth.default".to_string(),
            log_level: "warn".to_string(),
        };
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            auth_base_url: normalize_runtime_value("  "),
            log_level: normalize_runtime_value(""),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.auth_base_url, "https://auth.default");
        assert_eq!(config.log_level(), Level::WARN);
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig {
            api_base_url: "https://api.default".to_string(),
            auth_base_url: "https://auth.default".to_string(),
            log_level: "warn".to_string(),
        };
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            auth_base_url: normalize_runtime_value("https://auth.override"),
            log_level: normalize_runtime_value("nonsense"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.auth_base_url, "https://auth.override");
        assert_eq!(config.log_level(), Level::INFO);
    }
}
