pub mod audit;
pub mod cases;
pub mod config;
pub mod decision;
pub mod error;
pub mod numeric;
pub mod prioritization;
pub mod scoring;
pub mod service;
pub mod telemetry;
