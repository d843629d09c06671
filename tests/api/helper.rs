use chrono::NaiveDate;
use dotenv::dotenv;
use ecommerce_dashboard::analytics::cache::TableCache;
use ecommerce_dashboard::analytics::loader::{DataSource, Loader};
use ecommerce_dashboard::config::configuration::GeneratorSettings;
use ecommerce_dashboard::generator::{generate_dataset, write_workbook, Generator};
use ecommerce_dashboard::startup::{Application, DashboardState};
use ecommerce_dashboard::table::Workbook;
use ecommerce_dashboard::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    dotenv().ok();
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`, so the two
    // branches cannot share a variable.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub port: u16,
    pub address: String,
    pub cache: Arc<TableCache>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path_and_query))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Seeded and dated in the past, so every transaction falls in 2024.
pub fn seeded_workbook() -> Workbook {
    let settings = GeneratorSettings {
        customers: 25,
        vendors: 5,
        inventory: 30,
        transactions: 120,
        shipments: 40,
        seed: None,
    };
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    generate_dataset(&mut Generator::new(Some(42), today), &settings)
}

fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("dashboard-{}", Uuid::new_v4()))
        .join("ecommerce_data.json")
}

/// Serves a freshly generated workbook.
pub async fn spawn_app() -> TestApp {
    let path = scratch_path();
    write_workbook(&path, &seeded_workbook()).expect("Failed to write test workbook");
    spawn_app_with_source(DataSource::local(path)).await
}

/// Serves whatever `source` points at, which may not exist.
pub async fn spawn_app_with_source(source: DataSource) -> TestApp {
    // To Ensure that the tracing stack is only initialized once
    Lazy::force(&TRACING);

    let cache = Arc::new(TableCache::new());
    let state = DashboardState::new(Loader::new(Some(Arc::clone(&cache))), source);

    let application = Application::build("127.0.0.1", 0, state)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let address = format!("http://127.0.0.1:{}", application_port);
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        port: application_port,
        address,
        cache,
        api_client: reqwest::Client::new(),
    }
}

pub fn missing_source() -> DataSource {
    DataSource::local(scratch_path())
}
