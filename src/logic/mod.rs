pub mod classifiers;
pub mod forecast;
pub mod insight_service;
pub mod rules;

pub use insight_service::{InsightReport, InsightService};
