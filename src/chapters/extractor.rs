use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::pipeline::RunningContext;
use super::timestamp::parse_timestamp;
use super::{ChapterCandidate, Segment};
use crate::generation::{GenerationOptions, TextGenerator};

/// Reply token meaning the segment has no topic change.
pub const NO_CHAPTERS: &str = "NO_CHAPTERS";

/// Titles must be longer than this many characters to be kept.
const MIN_TITLE_CHARS: usize = 10;

/// How many previously accepted chapters are repeated back to the model.
const RECENT_CHAPTERS_IN_PROMPT: usize = 3;

// `[M:SS] Title`, `[H:MM:SS] - Title`, ...
static CHAPTER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{1,2}:\d{2}(?::\d{2})?)\]\s*[-–—]?\s*(.+)")
        .expect("valid chapter line regex")
});

static LEADING_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–—]\s*").expect("valid leading dash regex"));

/// Build the chapter prompt for one segment, including what earlier segments produced.
pub fn build_chapter_prompt(
    segment: &Segment,
    segment_index: usize,
    total_segments: usize,
    context: &RunningContext,
) -> String {
    let mut context_info = String::new();

    let recent = context.recent_chapters(RECENT_CHAPTERS_IN_PROMPT);
    if !recent.is_empty() {
        context_info.push_str("Previously identified chapters:\n");
        for chapter in recent {
            context_info.push_str(&format!("- {} {}\n", chapter.timestamp, chapter.title));
        }
        context_info.push('\n');
    }

    if let Some(summary) = context.summary() {
        context_info.push_str(&format!("What was covered before: {}\n\n", summary));
    }

    format!(
        r#"[Processing segment {position} of {total}]

{context_info}Analyze this YouTube video transcript segment and identify major chapter points.

RULES:
1. Only create chapters for CLEAR topic changes or new segments
2. Use EXACT timestamps from the transcript in [M:SS] or [H:MM:SS] format
3. Create engaging, specific chapter titles (5-12 words)
4. Aim for 1 chapter every 3-7 minutes (don't over-segment)
5. Build on previous chapters - avoid repeating similar topics
6. If this segment has no major topic changes, output "{sentinel}"

Transcript:
{text}

Output format (one per line):
[M:SS] Chapter Title Here
or
[H:MM:SS] Chapter Title Here

Chapters:"#,
        position = segment_index + 1,
        total = total_segments,
        context_info = context_info,
        sentinel = NO_CHAPTERS,
        text = segment.text,
    )
}

/// Parse one reply line into a candidate, if it has a leading bracketed timestamp
/// and a substantial title.
pub fn parse_chapter_line(line: &str) -> Option<ChapterCandidate> {
    let caps = CHAPTER_LINE.captures(line.trim())?;
    let timestamp = caps.get(1)?.as_str();
    let title = LEADING_DASH.replace(caps.get(2)?.as_str().trim(), "");
    let title = title.trim();

    if title.chars().count() <= MIN_TITLE_CHARS {
        return None;
    }

    Some(ChapterCandidate {
        timestamp: timestamp.to_string(),
        timestamp_seconds: parse_timestamp(timestamp).ok()?,
        title: title.to_string(),
    })
}

/// Parse a full model reply. The sentinel anywhere in the reply means no chapters.
pub fn parse_chapter_response(response: &str) -> Vec<ChapterCandidate> {
    let response = response.trim();
    if response.to_uppercase().contains(NO_CHAPTERS) {
        return Vec::new();
    }

    response
        .lines()
        .filter_map(|line| {
            let parsed = parse_chapter_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                debug!("Ignoring reply line: {}", line.trim());
            }
            parsed
        })
        .collect()
}

/// Ask the model for chapter markers in one segment.
/// A failed model call yields no candidates for that segment.
pub async fn extract_chapters(
    generator: &dyn TextGenerator,
    model: &str,
    segment: &Segment,
    segment_index: usize,
    total_segments: usize,
    context: &RunningContext,
) -> Vec<ChapterCandidate> {
    let prompt = build_chapter_prompt(segment, segment_index, total_segments, context);

    match generator.generate(model, &prompt, &GenerationOptions::extraction()).await {
        Ok(response) => parse_chapter_response(&response),
        Err(e) => {
            warn!("Error generating chapters for segment {}: {}", segment_index + 1, e);
            Vec::new()
        }
    }
}
