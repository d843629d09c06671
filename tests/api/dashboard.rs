use crate::helper::{missing_source, spawn_app, spawn_app_with_source};
use serde_json::Value;

const WHOLE_YEAR: &str = "/dashboard?period=custom&start=2024-01-01&end=2024-12-31";

#[tokio::test]
async fn dashboard_returns_the_view_model_for_the_whole_range() {
    let app = spawn_app().await;

    let response = app.get(WHOLE_YEAR).await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.expect("Body is not JSON");

    assert_eq!(view["kpis"]["transactionCount"], 120);
    assert_eq!(view["kpis"]["totalCustomers"], 25);
    assert_eq!(view["period"]["start"], "2024-01-01");
    assert_eq!(view["filterOptions"]["channels"][0], "All");
    assert_eq!(view["notices"].as_array().map(Vec::len), Some(0));
    let weekdays: Vec<&str> = view["sales"]["byDayOfWeek"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["key"].as_str().unwrap())
        .collect();
    assert_eq!(weekdays.first(), Some(&"Monday"));
}

#[tokio::test]
async fn channel_filter_is_applied_and_reported() {
    let app = spawn_app().await;

    let response = app
        .get(&format!("{}&channel=Website", WHOLE_YEAR))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.unwrap();

    assert_eq!(view["activeFilters"][0], "Channel: Website");
    for point in view["sales"]["byChannel"].as_array().unwrap() {
        assert_eq!(point["key"], "Website");
    }
}

#[tokio::test]
async fn dashboard_returns_a_400_for_invalid_filters() {
    let app = spawn_app().await;
    let test_cases = vec![
        ("/dashboard?period=last_year", "unknown period"),
        ("/dashboard?period=custom&start=31-01-2024", "malformed start date"),
        ("/dashboard?city=%3Cscript%3E", "forbidden characters"),
        ("/dashboard?brand=%20%20", "blank brand"),
    ];

    for (query, error_message) in test_cases {
        let response = app.get(query).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn missing_workbook_still_renders_with_notices() {
    let app = spawn_app_with_source(missing_source()).await;

    let response = app.get("/dashboard").await;
    assert_eq!(response.status().as_u16(), 200);
    let view: Value = response.json().await.unwrap();

    assert_eq!(view["kpis"]["totalSales"], 0.0);
    let notices = view["notices"].as_array().unwrap();
    assert_eq!(notices.len(), 5);
    assert!(notices[0].as_str().unwrap().contains("ecommerce_data.json"));
}

#[tokio::test]
async fn repeated_requests_read_through_the_cache() {
    let app = spawn_app().await;

    app.get(WHOLE_YEAR).await;
    app.get(WHOLE_YEAR).await;

    let stats = app.cache.stats();
    assert_eq!(stats.misses, 1);
    assert!(stats.hits >= 9);
}
