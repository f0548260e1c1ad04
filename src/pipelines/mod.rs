//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait and the
//! [lemma_forms::LemmaForms] dictionary compilation pipeline.
pub mod lemma_forms;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use lemma_forms::LemmaForms;
pub use pipeline::Pipeline;
