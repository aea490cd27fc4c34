//! Chapter markers for videos, generated from timestamped transcripts.
//!
//! The transcript is cut into overlapping segments, each segment is sent to a
//! text-generation model together with what earlier segments produced, and the
//! resulting candidates are merged into one ordered, deduplicated list.

pub mod chapters;
pub mod config;
pub mod error;
pub mod generation;

pub use chapters::{format_chapters, ChapterCandidate, ChapterGenerator, Segment};
pub use chapters::pipeline::ChapterSettings;
pub use config::Config;
pub use error::{ChapterError, Result};
pub use generation::{GenerationOptions, OllamaClient, TextGenerator};
