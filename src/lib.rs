//! Multi-document analysis and comparison for compliance review.
//!
//! The pipeline: [`extract`] turns heterogeneous documents (plain text,
//! word-processor, portable-document, image) into canonical records,
//! [`analysis`] computes per-document analytics, [`compare`] scores document
//! pairs, and [`batch`] orchestrates all of it over ordered path lists.

pub mod analysis;
pub mod batch;
pub mod capabilities;
pub mod compare;
pub mod config;
pub mod extract;
pub mod models;
