use crate::helper::{missing_source, spawn_app, spawn_app_with_source};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

#[tokio::test]
async fn sales_export_is_a_csv_attachment_of_the_filtered_rows() {
    let app = spawn_app().await;

    let response = app
        .get("/export/sales?period=custom&start=2024-01-01&end=2024-01-10")
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let disposition = response.headers()[CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("sales_data_"));

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("transactionID,"));
    assert!(header.contains("transactionDate"));
    assert_eq!(lines.count(), 10);
}

#[tokio::test]
async fn shipping_export_ignores_the_date_range() {
    let app = spawn_app().await;

    let response = app
        .get("/export/shipping?period=custom&start=2024-01-01&end=2024-01-02")
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(body.lines().count(), 41);
}

#[tokio::test]
async fn inventory_export_honours_the_brand_filter() {
    let app = spawn_app().await;

    let response = app.get("/export/inventory?brand=Dell").await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let brand = reader
        .headers()
        .unwrap()
        .iter()
        .position(|h| h == "brand")
        .unwrap();
    for record in reader.records() {
        assert_eq!(&record.unwrap()[brand], "Dell");
    }
}

#[tokio::test]
async fn raw_export_serves_a_loaded_table() {
    let app = spawn_app().await;

    let response = app.get("/export/raw/customers").await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("customerID,"));
    assert_eq!(body.lines().count(), 26);
}

#[tokio::test]
async fn raw_export_of_an_unknown_table_is_a_400() {
    let app = spawn_app().await;

    let response = app.get("/export/raw/orders").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn raw_export_of_a_table_that_failed_to_load_reports_why() {
    let app = spawn_app_with_source(missing_source()).await;

    let response = app.get("/export/raw/customers").await;

    assert_eq!(response.status().as_u16(), 503);
    let body = response.text().await.unwrap();
    assert!(body.contains("ecommerce_data.json"));
}
