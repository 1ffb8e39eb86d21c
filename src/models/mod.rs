//! Shared data models for the load generator

pub mod outcome;
pub mod request;

pub use outcome::{Outcome, Summary, FAILURE_STATUS};
pub use request::RequestSpec;
