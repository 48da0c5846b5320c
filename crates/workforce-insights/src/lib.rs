//! Skill gap analytics over occupation taxonomies, live job postings, and resume text.
//!
//! The `analysis` module holds the pure computations. `sources` adapts the upstream
//! providers, `dataset` summarizes the offline skill-gap export, and `insights`
//! wires everything behind HTTP routes.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod insights;
pub mod sources;
pub mod telemetry;
