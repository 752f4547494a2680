use crate::utils::error::{CitiesError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:1111";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:63342";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub data: DataSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind_address: Option<String>,
    pub allowed_origins: Option<Vec<String>>,
    pub json_logs: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    pub cities_file: String,
    pub words_file: String,
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CitiesError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after substituting `${VAR}` references from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CitiesError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CitiesError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        let raw = self
            .server
            .bind_address
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDRESS);
        validation::validate_socket_addr("server.bind_address", raw)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.server
            .allowed_origins
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
    }

    pub fn json_logs(&self) -> bool {
        self.server.json_logs.unwrap_or(false)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.bind_address()?;

        for origin in self.allowed_origins() {
            validation::validate_url("server.allowed_origins", &origin)?;
        }

        validation::validate_path("data.cities_file", &self.data.cities_file)?;
        validation::validate_path("data.words_file", &self.data.words_file)?;
        validation::validate_file_extensions(
            "data",
            &[self.data.cities_file.as_str(), self.data.words_file.as_str()],
            &["csv"],
        )?;

        Ok(())
    }
}
