use dotenv::dotenv;
use ecommerce_dashboard::analytics::cache::TableCache;
use ecommerce_dashboard::analytics::loader::{DataSource, Loader};
use ecommerce_dashboard::config::configuration::Settings;
use ecommerce_dashboard::startup::{Application, DashboardState};
use ecommerce_dashboard::telemetry::{get_subscriber, init_subscriber};
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber(
        "ecommerce-dashboard".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let config = Settings::new().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Failed to load configurations: {}", e),
        )
    })?;

    let mut source = DataSource::local(config.data.workbook_path());
    if let Some(base_url) = config.data.remote_base_url.clone() {
        source = source.with_remote(base_url);
    }
    let loader = Loader::new(Some(Arc::new(TableCache::new())));
    let state = DashboardState::new(loader, source);

    let application =
        Application::build(&config.application.host, config.application.port, state).await?;
    tracing::info!(
        "Dashboard listening on http://{}:{}",
        config.application.host,
        application.port()
    );
    application.run_until_stopped().await?;
    Ok(())
}
