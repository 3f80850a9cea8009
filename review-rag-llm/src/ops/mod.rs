pub mod classify;
pub mod review_markdown;
pub mod summarize;

pub use classify::classify;
pub use review_markdown::review_markdown;
pub use summarize::{Summary, summarize};
