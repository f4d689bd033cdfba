//! Page-provided configuration.
//!
//! The page shell may carry
//! `<meta name="tasklist-config" content='{"base_url": "..."}'>`. A missing
//! tag means defaults; a broken one is logged and also means defaults, so a
//! typo never leaves the page blank.

use tasklist_core::ClientConfig;
use tracing::warn;

pub const CONFIG_META_NAME: &str = "tasklist-config";

pub fn resolve(content: Option<&str>) -> ClientConfig {
    let Some(raw) = content.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ClientConfig::default();
    };
    match ClientConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "ignoring page config, using defaults");
            ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::RefreshPolicy;

    #[test]
    fn missing_or_blank_meta_gives_defaults() {
        assert_eq!(resolve(None), ClientConfig::default());
        assert_eq!(resolve(Some("   ")), ClientConfig::default());
    }

    #[test]
    fn meta_overrides_base_url() {
        let config = resolve(Some(r#"{"base_url":"https://todo.example/api/"}"#));
        assert_eq!(config.base_url, "https://todo.example/api/");
        assert_eq!(config.refresh, RefreshPolicy::FullRefetch);
    }

    #[test]
    fn broken_meta_falls_back() {
        assert_eq!(resolve(Some("{base_url:")), ClientConfig::default());
        assert_eq!(resolve(Some(r#"{"base_url":""}"#)), ClientConfig::default());
    }
}
