pub mod context;
pub mod habit;
pub mod report;
