pub mod analytics;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod generator;
pub mod routes;
pub mod startup;
pub mod table;
pub mod telemetry;
pub mod validations;
