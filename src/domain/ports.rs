use crate::domain::model::{City, Page, PageRequest, RenderResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait CityRepository: Send + Sync {
    /// Cities in storage order.
    fn find_all(&self, request: PageRequest) -> Result<Page<City>>;
    fn find_all_by_name_asc(&self, request: PageRequest) -> Result<Page<City>>;
    /// Cities whose name is exactly `length` characters long.
    fn find_with_name_length(&self, length: usize) -> Result<Vec<City>>;
}

pub trait WordRepository: Send + Sync {
    fn find_words_with_length(&self, length: usize) -> Result<Vec<String>>;
}

/// A markup document that fragments can be appended to, like
/// `insertAdjacentHTML('beforeend', ..)` on an element looked up by id.
pub trait Document: Send + Sync {
    fn append_html(&mut self, element_id: &str, html: &str) -> Result<()>;
    fn markup(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn page(&self) -> u32;
    fn size(&self) -> u32;
    fn element_id(&self) -> &str;
    fn template_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<City>>;
    async fn transform(&self, data: Vec<City>) -> Result<RenderResult>;
    async fn load(&self, result: RenderResult) -> Result<String>;
}
