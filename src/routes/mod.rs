pub mod dashboard;
pub mod export;
pub mod health_check;
