pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:1111/api/cities/queryByPage";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "cities"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Fetch a page of cities and append them to an HTML list")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_API_ENDPOINT))]
    pub api_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "1"))]
    pub page: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value = "20"))]
    pub size: u32,

    /// Id of the element the list items are appended to
    #[cfg_attr(feature = "cli", arg(long, default_value = "resultList"))]
    pub element_id: String,

    /// HTML page to append into; a minimal page is used when omitted
    #[cfg_attr(feature = "cli", arg(long))]
    pub template: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "cities.html"))]
    pub output_file: String,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            page: 1,
            size: 20,
            element_id: "resultList".to_string(),
            template: None,
            output_path: "./output".to_string(),
            output_file: "cities.html".to_string(),
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn page(&self) -> u32 {
        self.page
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn template_path(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_positive_number("page", self.page, 1)?;
        validation::validate_positive_number("size", self.size, 1)?;
        validation::validate_non_empty_string("element_id", &self.element_id)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_path("output_file", &self.output_file)?;
        if let Some(template) = &self.template {
            validation::validate_path("template", template)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page(), 1);
        assert_eq!(config.size(), 20);
        assert_eq!(config.element_id(), "resultList");
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = CliConfig {
            size: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_element_id_rejected() {
        let config = CliConfig {
            element_id: " ".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_defaults() {
        use clap::Parser;

        let config = CliConfig::parse_from(["cities", "--size", "5"]);
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.size, 5);
        assert_eq!(config.page, 1);
        assert!(config.template.is_none());
    }
}
