pub mod aggregation;
pub mod export_service;
