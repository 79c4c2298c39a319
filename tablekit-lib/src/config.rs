//! Table configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Tunables for a table session.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use tablekit_lib::TableConfig;
///
/// let config = TableConfig::from_json_str(r#"{ "page_size": 3 }"#).unwrap();
/// assert_eq!(config.page_size, 3);
/// assert_eq!(config.max_visible_pages, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Top-level rows per page.
    pub page_size: usize,
    /// Width of the page-number window.
    pub max_visible_pages: usize,
    /// Fuzzy name threshold: 0.0 accepts only the best possible match, 1.0 accepts any match.
    pub fuzzy_threshold: f64,
    /// Price range a fresh filter selection starts with.
    pub default_price_range: (f64, f64),
    /// Indentation units per nesting level.
    pub indent_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_visible_pages: 5,
            fuzzy_threshold: 0.3,
            default_price_range: (0.0, 1000.0),
            indent_width: 2,
        }
    }
}

impl TableConfig {
    /// Parses and validates a JSON configuration object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_default_price_range(mut self, min: f64, max: f64) -> Self {
        self.default_price_range = (min, max);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.max_visible_pages == 0 {
            return Err(ConfigError::ZeroPageWindow);
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ConfigError::Threshold(self.fuzzy_threshold));
        }
        let (min, max) = self.default_price_range;
        if min > max {
            return Err(ConfigError::PriceRange { min, max });
        }
        Ok(())
    }
}
