use super::dashboard::{today, DashboardQuery};
use crate::analytics::view::apply_filters;
use crate::domain::EntityKind;
use crate::errors::custom::DashboardError;
use crate::export::{export_file_name, table_to_csv};
use crate::startup::DashboardState;
use crate::table::Table;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use tracing::instrument;

/// Which filtered table an export route hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Sales,
    Inventory,
    Shipping,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Sales => "sales",
            ExportKind::Inventory => "inventory",
            ExportKind::Shipping => "shipping",
        }
    }
}

fn csv_attachment(table: &Table, file_name: String) -> Result<HttpResponse, DashboardError> {
    let body = table_to_csv(table)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(body))
}

async fn export_filtered(
    kind: ExportKind,
    state: &DashboardState,
    query: DashboardQuery,
) -> Result<HttpResponse, DashboardError> {
    let today = today();
    let filters = query
        .validate(today)
        .map_err(DashboardError::ValidationError)?;
    let dataset = state.loader.load_all(&state.source).await;
    let tables = apply_filters(&filters, &dataset);
    let table = match kind {
        ExportKind::Sales => &tables.sales,
        ExportKind::Inventory => &tables.inventory,
        ExportKind::Shipping => &tables.shipments,
    };
    csv_attachment(table, export_file_name(kind.as_str(), today))
}

/******************************************/
// Filtered export routes
/******************************************/
/**
 * @route   GET /export/sales
 * @access  Public
 */
#[instrument(name = "Export filtered sales", skip(state, query))]
pub async fn export_sales(
    state: web::Data<DashboardState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, DashboardError> {
    export_filtered(ExportKind::Sales, &state, query.into_inner()).await
}

/**
 * @route   GET /export/inventory
 * @access  Public
 */
#[instrument(name = "Export filtered inventory", skip(state, query))]
pub async fn export_inventory(
    state: web::Data<DashboardState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, DashboardError> {
    export_filtered(ExportKind::Inventory, &state, query.into_inner()).await
}

/**
 * @route   GET /export/shipping
 * @access  Public
 */
#[instrument(name = "Export shipments", skip(state, query))]
pub async fn export_shipping(
    state: web::Data<DashboardState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, DashboardError> {
    export_filtered(ExportKind::Shipping, &state, query.into_inner()).await
}

/******************************************/
// Raw table export route
/******************************************/
/**
 * @route   GET /export/raw/{table}
 * @access  Public
 */
#[instrument(name = "Export a raw table", skip(state, table), fields(table = %table))]
pub async fn export_raw(
    state: web::Data<DashboardState>,
    table: web::Path<String>,
) -> Result<HttpResponse, DashboardError> {
    let sheet = table.into_inner();
    let kind = EntityKind::from_sheet_name(&sheet)
        .ok_or_else(|| DashboardError::UnknownTable(sheet.clone()))?;
    let load = state.loader.load_table(&state.source, kind.sheet_name()).await;
    // An empty download would hide why the table is empty.
    if let Some(notice) = load.notice {
        return Err(notice.into());
    }
    csv_attachment(&load.table, export_file_name(kind.sheet_name(), today()))
}
