//! Distill stage (spec §4.4/§4.5): two interchangeable strategies that
//! synthesize the `ArchItem` corpus into a `Guideline` corpus.

mod chunked;
mod clustered;
mod errors;
mod guideline_io;
mod kmeans;

pub use chunked::distill_chunked;
pub use clustered::distill_clustered;
pub use errors::{DistillError, Result};
pub use guideline_io::write_guidelines;
