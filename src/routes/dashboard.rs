use crate::analytics::view::{render, DashboardFilters};
use crate::errors::custom::DashboardError;
use crate::startup::DashboardState;
use crate::validations::filters::{FilterValue, TimePeriod};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub channel: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub brand: Option<String>,
}
impl DashboardQuery {
    pub fn validate(self, today: NaiveDate) -> Result<DashboardFilters, String> {
        let period = TimePeriod::parse(
            self.period.as_deref(),
            self.start.as_deref(),
            self.end.as_deref(),
        )?;
        let (start, end) = period.resolve(today);
        Ok(DashboardFilters {
            start,
            end,
            channel: FilterValue::parse(self.channel)?,
            city: FilterValue::parse(self.city)?,
            state: FilterValue::parse(self.state)?,
            brand: FilterValue::parse(self.brand)?,
        })
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/******************************************/
// Dashboard view route
/******************************************/
/**
 * @route   GET /dashboard
 * @access  Public
 */
#[instrument(name = "Render the dashboard", skip(state, query))]
pub async fn dashboard(
    state: web::Data<DashboardState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, DashboardError> {
    let filters = query
        .into_inner()
        .validate(today())
        .map_err(DashboardError::ValidationError)?;
    let dataset = state.loader.load_all(&state.source).await;
    let view = render(&filters, &dataset);
    Ok(HttpResponse::Ok().json(view))
}
