//! Shared data model for Review-RAG.
//!
//! This crate has no I/O. It defines the three entities that flow through
//! the pipeline (`ReviewRecord` -> `ArchItem` -> `Guideline`), the controlled
//! vocabulary boundary, comment reduction, and the shared JSON extractor
//! used to recover structured output from LLM text.

mod errors;
mod extract;
mod guideline;
mod reduce;
mod record;
mod vocabulary;

pub use errors::CoreError;
pub use extract::extract_json_array;
pub use guideline::Guideline;
pub use reduce::reduce_comment;
pub use record::{ArchItem, ReviewRecord};
pub use vocabulary::Vocabulary;
