use cities::core::ConfigProvider;
use cities::utils::error::CitiesError;
use cities::utils::{logger, validation::Validate};
use cities::{call_cities, CityListPipeline, CliConfig, Engine, HtmlDocument, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cities client");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let document = match config.template_path() {
        Some(path) => match HtmlDocument::from_file(path).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to read page template '{}': {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                exit_on(&e);
                HtmlDocument::default()
            }
        },
        None => HtmlDocument::default(),
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match CityListPipeline::new(storage, config, document) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            exit_on(&e);
            return Ok(());
        }
    };

    let engine = Engine::new(pipeline);

    // Fetch failures are already logged; the run itself still succeeds.
    if let Some(output_path) = call_cities(&engine).await {
        println!("📁 Cities written to: {}", output_path);
    }

    Ok(())
}

// Low severity is only a warning; the caller carries on.
fn exit_on(e: &CitiesError) {
    let code = e.severity().exit_code();
    if code > 0 {
        std::process::exit(code);
    }
}
