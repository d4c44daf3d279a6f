//! Service layer for dti-query
//!
//! The service layer holds the query engine and the statistics it is built
//! on. Front-ends call into it and never touch records directly.

pub mod query;
pub mod stats;

pub use query::IndexQueryEngine;
