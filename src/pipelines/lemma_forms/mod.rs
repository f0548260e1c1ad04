//! Lemma dictionary and deinflection table compilation.
pub mod outline;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod types;

pub use pipeline::LemmaForms;
