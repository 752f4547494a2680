pub mod client;
pub mod document;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{City, PaginatedResponse, RenderResult};
pub use crate::domain::ports::{ConfigProvider, Document, Pipeline, Storage};
pub use crate::utils::error::Result;
