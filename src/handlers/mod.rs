pub mod analyze;
pub mod api;
pub mod docs;
pub mod health;
pub mod metrics;
pub mod report;
