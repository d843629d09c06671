use dotenv::dotenv;
use ecommerce_dashboard::analytics::integrity::integrity_report;
use ecommerce_dashboard::analytics::Dataset;
use ecommerce_dashboard::config::configuration::Settings;
use ecommerce_dashboard::generator::{generate_dataset, write_workbook, Generator};
use ecommerce_dashboard::telemetry::{get_subscriber, init_subscriber};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    // stdout carries the progress lines, logs go to stderr
    let subscriber = get_subscriber("generate_data".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let config = Settings::new()?;
    let today = chrono::Local::now().date_naive();
    let mut generator = Generator::new(config.generator.seed, today);

    println!("Generating dummy data...");
    let workbook = generate_dataset(&mut generator, &config.generator);

    let report = integrity_report(&Dataset::from_workbook(&workbook));
    if !report.is_consistent() {
        tracing::warn!(?report, "generated dataset has dangling references");
    }

    let path = config.data.workbook_path();
    if let Err(e) = write_workbook(&path, &workbook) {
        eprintln!("Error generating dummy data: {}", e);
        return Err(e.into());
    }
    println!("All dummy data generated successfully in {}", path.display());
    Ok(())
}
