//! CLI command implementations

pub mod connect;
pub mod dashboard;
pub mod expectations;
pub mod health;
pub mod logs;
