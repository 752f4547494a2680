pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{InMemoryCityRepository, InMemoryWordRepository, LocalStorage};
pub use config::{toml_config::ServerConfig, CliConfig};
pub use core::{
    document::HtmlDocument,
    engine::{call_cities, Engine},
    pipeline::CityListPipeline,
};
pub use domain::model::{City, PaginatedResponse, PermutableCityResponse};
pub use domain::services::CityService;
pub use utils::error::{CitiesError, Result};
