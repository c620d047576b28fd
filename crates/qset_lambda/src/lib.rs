//! AWS-oriented adapters and handlers for the question-set API.
//!
//! This crate owns runtime integration details (the Lambda entry point, the S3
//! store adapter, environment configuration, and log setup). Domain behavior
//! lives in `qset_core`; handlers here only translate API Gateway events into
//! repository calls and repository errors into HTTP statuses.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
