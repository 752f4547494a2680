use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct Engine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Fetching cities...");
        let cities = self.pipeline.extract().await?;
        tracing::info!("Fetched {} cities", cities.len());

        let rendered = self.pipeline.transform(cities).await?;
        tracing::debug!("Rendered {} list items", rendered.fragments.len());

        let output_path = self.pipeline.load(rendered).await?;
        tracing::info!("Document saved to: {}", output_path);

        Ok(output_path)
    }
}

/// Runs the engine once. Failures are logged as a single error event and
/// swallowed; the caller only learns whether an output was produced.
pub async fn call_cities<P: Pipeline>(engine: &Engine<P>) -> Option<String> {
    match engine.run().await {
        Ok(output_path) => Some(output_path),
        Err(e) => {
            tracing::error!(
                category = ?e.category(),
                severity = ?e.severity(),
                "Failed to load cities: {}",
                e
            );
            None
        }
    }
}
