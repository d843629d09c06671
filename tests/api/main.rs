mod dashboard;
mod export;
mod health_check;
mod helper;
mod remote;
