use crate::analytics::loader::{DataSource, Loader};
use crate::routes::{
    dashboard::dashboard,
    export::{export_inventory, export_raw, export_sales, export_shipping},
    health_check::health_check,
};
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/******************************************/
// Shared state handed to every route
/******************************************/
pub struct DashboardState {
    pub loader: Loader,
    pub source: DataSource,
}

impl DashboardState {
    pub fn new(loader: Loader, source: DataSource) -> Self {
        Self { loader, source }
    }
}

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(host: &str, port: u16, state: DashboardState) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&address)?;
        let actual_port = listener.local_addr()?.port();

        let server = run_server(listener, state)?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/******************************************/
// Running Server
/******************************************/
pub fn run_server(listener: TcpListener, state: DashboardState) -> Result<Server, std::io::Error> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/dashboard", web::get().to(dashboard))
            .service(
                web::scope("/export")
                    .route("/sales", web::get().to(export_sales))
                    .route("/inventory", web::get().to(export_inventory))
                    .route("/shipping", web::get().to(export_shipping))
                    .route("/raw/{table}", web::get().to(export_raw)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
