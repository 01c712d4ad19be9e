use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Settings shared by every list page.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ListConfig {
    #[serde(default)]
    pub list: ListSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListSection {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Pages shown on each side of the current one in the page strip
    pub window_delta: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ExportSection {
    /// Prepend a UTF-8 BOM so Excel picks the right encoding
    pub bom: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ApiSection {
    /// Empty means "same host, port 3000"
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid list configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("page_size must be positive")]
    ZeroPageSize,
    #[error("configuration already initialized")]
    AlreadySet,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[list]
page_size = 100
page_size_options = [50, 100, 200, 500]
window_delta = 2

[export]
bom = false

[api]
base_url = ""
"#;

impl Default for ListSection {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_size_options: vec![50, 100, 200, 500],
            window_delta: 2,
        }
    }
}

impl ListSection {
    /// Size picked in the page-size selector. Sizes not on offer fall back to the default.
    pub fn checked_page_size(&self, requested: usize) -> usize {
        if self.page_size_options.contains(&requested) {
            requested
        } else {
            self.page_size
        }
    }
}

impl ListConfig {
    /// Parse a TOML document. Missing sections fall back to defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ListConfig = toml::from_str(contents)?;
        if config.list.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(config)
    }
}

static CONFIG: OnceCell<ListConfig> = OnceCell::new();

/// Install the configuration once at startup.
pub fn init_config(contents: &str) -> Result<(), ConfigError> {
    let config = ListConfig::from_toml(contents)?;
    log::info!(
        "list config: page_size={}, window_delta={}",
        config.list.page_size,
        config.list.window_delta
    );
    CONFIG.set(config).map_err(|_| ConfigError::AlreadySet)
}

/// Active configuration (embedded defaults until [`init_config`] runs).
pub fn config() -> &'static ListConfig {
    CONFIG.get_or_init(|| ListConfig::from_toml(DEFAULT_CONFIG).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = ListConfig::from_toml(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, ListConfig::default());
        assert_eq!(config.list.page_size_options, vec![50, 100, 200, 500]);
    }

    #[test]
    fn test_partial_override() {
        let config = ListConfig::from_toml("[export]\nbom = true\n").unwrap();
        assert!(config.export.bom);
        assert_eq!(config.list.page_size, 100);
    }

    #[test]
    fn test_partial_list_section() {
        let config = ListConfig::from_toml("[list]\npage_size = 50\n").unwrap();
        assert_eq!(config.list.page_size, 50);
        assert_eq!(config.list.page_size_options, vec![50, 100, 200, 500]);
        assert_eq!(config.list.window_delta, 2);
        assert!(!ListConfig::from_toml("[export]\n").unwrap().export.bom);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let toml = "[list]\npage_size = 0\npage_size_options = []\nwindow_delta = 2\n";
        assert!(matches!(ListConfig::from_toml(toml), Err(ConfigError::ZeroPageSize)));
        assert!(matches!(ListConfig::from_toml("[list"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_checked_page_size() {
        let list = ListSection::default();
        assert_eq!(list.checked_page_size(200), 200);
        assert_eq!(list.checked_page_size(7), 100);
    }
}
