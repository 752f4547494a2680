use cities::core::Document;
use cities::{call_cities, CityListPipeline, CliConfig, Engine, HtmlDocument, LocalStorage};
use httpmock::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts error-level events emitted by this crate.
#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() == tracing::Level::ERROR && meta.target().starts_with("cities") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn config_for(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        api_endpoint: server.url("/api/cities/queryByPage"),
        output_path: output_path.to_string(),
        ..CliConfig::default()
    }
}

#[tokio::test]
async fn test_appends_one_item_per_city_in_response_order() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/cities/queryByPage")
            .query_param("page", "1")
            .query_param("size", "20");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "content": [
                    {"id": 9, "name": "Zagreb"},
                    {"id": 2, "name": "Amsterdam"},
                    {"id": 5, "name": "Bergamo"}
                ],
                "totalPages": 1,
                "totalElements": 3,
                "last": true,
                "size": 20,
                "number": 1
            }));
    });

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CityListPipeline::new(
        storage,
        config_for(&server, &output_path),
        HtmlDocument::default(),
    )
    .unwrap();
    let engine = Engine::new(pipeline);

    let output = call_cities(&engine).await;

    api_mock.assert();
    assert_eq!(output, Some(format!("{}/cities.html", output_path)));

    let document = engine.pipeline().document().await;
    assert_eq!(document.count_items("resultList").unwrap(), 3);
    assert!(document.markup().contains(
        "<ul id=\"resultList\"><li>Zagreb</li><li>Amsterdam</li><li>Bergamo</li></ul>"
    ));

    let written = std::fs::read_to_string(temp_dir.path().join("cities.html")).unwrap();
    assert_eq!(written, document.markup());
}

#[tokio::test]
async fn test_empty_page_appends_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/cities/queryByPage");
        then.status(200).json_body(serde_json::json!({ "content": [] }));
    });

    let pipeline = CityListPipeline::new(
        LocalStorage::new(output_path.clone()),
        config_for(&server, &output_path),
        HtmlDocument::default(),
    )
    .unwrap();
    let engine = Engine::new(pipeline);

    assert!(call_cities(&engine).await.is_some());
    let document = engine.pipeline().document().await;
    assert_eq!(document, HtmlDocument::default());
    assert_eq!(document.count_items("resultList").unwrap(), 0);
}

#[tokio::test]
async fn test_failed_fetch_logs_once_and_leaves_document_untouched() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/cities/queryByPage");
        then.status(503);
    });

    let pipeline = CityListPipeline::new(
        LocalStorage::new(output_path.clone()),
        config_for(&server, &output_path),
        HtmlDocument::default(),
    )
    .unwrap();
    let engine = Engine::new(pipeline);

    let output = call_cities(&engine).await;

    api_mock.assert_hits(1);
    assert!(output.is_none());
    assert_eq!(counter.count(), 1);
    assert_eq!(engine.pipeline().document().await, HtmlDocument::default());
    assert!(!temp_dir.path().join("cities.html").exists());
}

#[tokio::test]
async fn test_malformed_body_logs_once_and_leaves_document_untouched() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/cities/queryByPage");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"content\": [{\"name\": ");
    });

    let pipeline = CityListPipeline::new(
        LocalStorage::new(output_path.clone()),
        config_for(&server, &output_path),
        HtmlDocument::default(),
    )
    .unwrap();
    let engine = Engine::new(pipeline);

    assert!(call_cities(&engine).await.is_none());
    assert_eq!(counter.count(), 1);
    assert_eq!(engine.pipeline().document().await, HtmlDocument::default());
}

#[tokio::test]
async fn test_unreachable_api_logs_once() {
    let counter = ErrorCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Bind then drop so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = CliConfig {
        api_endpoint: format!("http://127.0.0.1:{}/api/cities/queryByPage", port),
        output_path: output_path.clone(),
        ..CliConfig::default()
    };
    let pipeline =
        CityListPipeline::new(LocalStorage::new(output_path), config, HtmlDocument::default())
            .unwrap();
    let engine = Engine::new(pipeline);

    assert!(call_cities(&engine).await.is_none());
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_appends_into_custom_template() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let template_path = temp_dir.path().join("index.html");
    std::fs::write(
        &template_path,
        "<html><body><h1>Cities</h1><ol id=\"cityList\"><li>Pinned</li></ol></body></html>",
    )
    .unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/cities/queryByPage")
            .query_param("page", "2")
            .query_param("size", "2");
        then.status(200).json_body(serde_json::json!({
            "content": [{"id": 3, "name": "Cordoba"}, {"id": 4, "name": "Dresden"}]
        }));
    });

    let config = CliConfig {
        page: 2,
        size: 2,
        element_id: "cityList".to_string(),
        template: Some(template_path.to_str().unwrap().to_string()),
        output_file: "page.html".to_string(),
        ..config_for(&server, &output_path)
    };

    let document = HtmlDocument::from_file(&template_path).await.unwrap();
    let pipeline =
        CityListPipeline::new(LocalStorage::new(output_path.clone()), config, document).unwrap();
    let engine = Engine::new(pipeline);

    assert!(call_cities(&engine).await.is_some());

    let written = std::fs::read_to_string(temp_dir.path().join("page.html")).unwrap();
    assert_eq!(
        written,
        "<html><body><h1>Cities</h1><ol id=\"cityList\"><li>Pinned</li><li>Cordoba</li><li>Dresden</li></ol></body></html>"
    );
}
