use crate::core::client::CitiesClient;
use crate::core::document::escape_html;
use crate::core::{City, ConfigProvider, Document, Pipeline, RenderResult, Storage};
use crate::utils::error::Result;
use tokio::sync::Mutex;

/// Fetches one page of cities and appends them as list items to a document.
pub struct CityListPipeline<S: Storage, C: ConfigProvider, D: Document + Clone> {
    storage: S,
    config: C,
    client: CitiesClient,
    document: Mutex<D>,
}

impl<S: Storage, C: ConfigProvider, D: Document + Clone> CityListPipeline<S, C, D> {
    pub fn new(storage: S, config: C, document: D) -> Result<Self> {
        let client = CitiesClient::new(config.api_endpoint())?;
        Ok(Self {
            storage,
            config,
            client,
            document: Mutex::new(document),
        })
    }

    /// Current state of the document.
    pub async fn document(&self) -> D {
        self.document.lock().await.clone()
    }
}

pub fn render_item(city: &City) -> String {
    format!("<li>{}</li>", escape_html(&city.name))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, D: Document + Clone> Pipeline for CityListPipeline<S, C, D> {
    async fn extract(&self) -> Result<Vec<City>> {
        let page = self
            .client
            .fetch_page(self.config.page(), self.config.size())
            .await?;

        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        tracing::debug!("Fetched cities: {:?}", names);

        Ok(page.content)
    }

    async fn transform(&self, data: Vec<City>) -> Result<RenderResult> {
        let fragments = data.iter().map(render_item).collect();
        let names = data.into_iter().map(|c| c.name).collect();

        Ok(RenderResult { names, fragments })
    }

    async fn load(&self, result: RenderResult) -> Result<String> {
        let element_id = self.config.element_id();
        let mut document = self.document.lock().await;

        // Work on a copy so a failed append leaves the document untouched.
        let mut staged = document.clone();
        for fragment in &result.fragments {
            staged.append_html(element_id, fragment)?;
        }

        tracing::debug!(
            "Appended {} items to #{}; writing {}",
            result.fragments.len(),
            element_id,
            self.config.output_file()
        );
        self.storage
            .write_file(self.config.output_file(), staged.markup().as_bytes())
            .await?;

        *document = staged;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            self.config.output_file()
        ))
    }
}
