//! Core data types shared by the fetch and conversion halves.

pub mod document;
pub mod query;
