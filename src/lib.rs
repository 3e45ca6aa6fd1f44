#![forbid(unsafe_code)]

mod authentication;
pub mod config;
mod routes;
mod session;
pub mod startup;
pub mod telemetry;
mod utils;
