//! Core types shared across the load pipeline.

pub mod identifier;
pub mod schema;

pub use schema::{Column, ColumnSchema};
