use crate::helper::{missing_source, seeded_workbook, spawn_app_with_source};
use actix_web::{web, App, HttpResponse, HttpServer};
use ecommerce_dashboard::table::Workbook;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;

type Sheets = HashMap<String, Value>;

async fn serve_sheet(sheets: web::Data<Sheets>, file: web::Path<String>) -> HttpResponse {
    let file = file.into_inner();
    let sheet = file.strip_suffix(".json").unwrap_or(&file);
    match sheets.get(sheet) {
        Some(body) => HttpResponse::Ok().json(body),
        None => HttpResponse::NotFound().finish(),
    }
}

fn sheets_of(workbook: &Workbook) -> Sheets {
    workbook
        .sheets
        .iter()
        .map(|s| (s.name.clone(), serde_json::to_value(s.to_table()).unwrap()))
        .collect()
}

/// Serves `/{sheet}.json` for every entry of `sheets`, returning its base URL.
fn spawn_remote(sheets: Sheets) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let sheets = web::Data::new(sheets);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(sheets.clone())
            .route("/{file}", web::get().to(serve_sheet))
    })
    .listen(listener)
    .unwrap()
    .run();
    let _ = tokio::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn missing_local_file_falls_back_to_the_remote_source() {
    let base_url = spawn_remote(sheets_of(&seeded_workbook()));
    let app = spawn_app_with_source(missing_source().with_remote(base_url)).await;

    let response = app
        .get("/dashboard?period=custom&start=2024-01-01&end=2024-12-31")
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.unwrap();

    assert_eq!(view["kpis"]["transactionCount"], 120);
    assert_eq!(view["notices"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn a_sheet_the_remote_lacks_becomes_a_notice() {
    let mut sheets = sheets_of(&seeded_workbook());
    sheets.remove("vendors");
    let base_url = spawn_remote(sheets);
    let app = spawn_app_with_source(missing_source().with_remote(base_url)).await;

    let view: Value = app.get("/dashboard").await.json().await.unwrap();

    let notices = view["notices"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].as_str().unwrap().contains("vendors.json"));
}

#[tokio::test]
async fn remote_rows_shorter_than_the_header_still_render_and_export() {
    let mut sheets = sheets_of(&seeded_workbook());
    sheets.insert(
        "transactions".to_string(),
        json!({
            "columns": ["transactionID", "customerID", "inventoryID", "totalSales"],
            "rows": [["TRN00001", "CUST0001", "INV0001"], ["TRN00002"]]
        }),
    );
    let base_url = spawn_remote(sheets);
    let app = spawn_app_with_source(missing_source().with_remote(base_url)).await;

    let response = app
        .get("/dashboard?period=custom&start=2024-01-01&end=2024-12-31")
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["kpis"]["transactionCount"], 2);
    assert_eq!(view["kpis"]["totalSales"], 0.0);

    let response = app.get("/export/raw/transactions").await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(
        body,
        "transactionID,customerID,inventoryID,totalSales\nTRN00001,CUST0001,INV0001,\nTRN00002,,,\n"
    );
}
