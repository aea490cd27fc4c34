pub mod extractor;
pub mod pipeline;
pub mod reconcile;
pub mod segmenter;
pub mod summarizer;
pub mod timestamp;

pub use extractor::{
    build_chapter_prompt, extract_chapters, parse_chapter_line, parse_chapter_response,
};
pub use pipeline::{format_chapters, ChapterGenerator, RunningContext};
pub use reconcile::{deduplicate_chapters, reconcile_chapters};
pub use segmenter::segment_transcript;
pub use summarizer::summarize_segment;
pub use timestamp::{format_timestamp, parse_timestamp, split_timestamped_line};

use serde::{Deserialize, Serialize};

/// A contiguous, possibly overlapping slice of the transcript sent to the model in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start_timestamp: Option<String>,
    pub start_seconds: Option<u64>,
}

/// A chapter marker proposed by the model for one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCandidate {
    pub timestamp: String,
    pub timestamp_seconds: u64,
    pub title: String,
}
