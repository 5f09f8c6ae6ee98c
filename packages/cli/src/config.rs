use mailblocks_common::EmailStyles;
use mailblocks_compiler_html::DocumentOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailblocks.config.json";

/// Mailblocks configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Document `<title>` for exported emails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Content container max width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,

    /// Email-wide styles; missing keys keep their defaults
    #[serde(default)]
    pub email_styles: EmailStyles,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Document options with CLI flags taking precedence over the file
    pub fn document_options(&self, title: Option<&str>, max_width: Option<u32>) -> DocumentOptions {
        self.document_options_for(&self.email_styles, title, max_width)
    }

    /// Like [`Config::document_options`], but themed by `email_styles`
    /// (e.g. from a saved style file) instead of the config's own record
    pub fn document_options_for(
        &self,
        email_styles: &EmailStyles,
        title: Option<&str>,
        max_width: Option<u32>,
    ) -> DocumentOptions {
        let mut options = DocumentOptions::from_email_styles(email_styles);

        if let Some(title) = title.or(self.title.as_deref()) {
            options.title = title.to_string();
        }
        if let Some(max_width) = max_width.or(self.max_width) {
            options.max_width = max_width;
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "title": "Newsletter",
            "maxWidth": 640,
            "emailStyles": { "fontFamily": "Georgia", "backgroundColor": "#000000" }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.title.as_deref(), Some("Newsletter"));
        assert_eq!(config.max_width, Some(640));
        assert_eq!(config.email_styles.font_family, "Georgia");
        assert_eq!(config.email_styles.background_color, "#000000");
        assert_eq!(
            config.email_styles.border_color,
            EmailStyles::default().border_color
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        let options = config.document_options(None, None);
        assert_eq!(options.title, "Email Template");
        assert_eq!(options.max_width, 600);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            title: Some("From file".to_string()),
            max_width: Some(500),
            ..Default::default()
        };

        let options = config.document_options(Some("From flag"), None);
        assert_eq!(options.title, "From flag");
        assert_eq!(options.max_width, 500);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "maxWidth": 480 }"#,
        )
        .unwrap();

        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.max_width, Some(480));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }
}
