use tracing::debug;

use super::timestamp::{parse_timestamp, split_timestamped_line};
use super::Segment;
use crate::error::Result;

/// Minimum number of lines carried into the next segment when overlapping.
const MIN_OVERLAP_LINES: usize = 3;

struct BufferedLine<'a> {
    text: &'a str,
    timestamp: Option<&'a str>,
    length: usize,
}

/// Split a `[timestamp] text` transcript into overlapping, size-bounded segments.
///
/// Lines are never split: a segment closes when the next line would push the running
/// character count past `chunk_size`. When the closed segment is longer than `overlap`,
/// its last quarter of lines (at least three) seeds the next segment.
pub fn segment_transcript(
    transcript: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current: Vec<BufferedLine> = Vec::new();
    let mut current_length = 0usize;

    for raw_line in transcript.trim().lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (timestamp, _) = split_timestamped_line(line);
        let line_length = line.chars().count();

        if current_length + line_length > chunk_size && !current.is_empty() {
            let segment = close_segment(&current)?;
            let closed_length = segment.text.chars().count();
            segments.push(segment);

            if closed_length > overlap {
                let keep = (current.len() / 4).max(MIN_OVERLAP_LINES);
                let carry_from = current.len().saturating_sub(keep);
                current.drain(..carry_from);
                current_length = current.iter().map(|l| l.length).sum();
            } else {
                current.clear();
                current_length = 0;
            }
        }

        current.push(BufferedLine {
            text: line,
            timestamp,
            length: line_length,
        });
        current_length += line_length;
    }

    if !current.is_empty() {
        segments.push(close_segment(&current)?);
    }

    debug!(
        "Segmented transcript into {} segments (chunk_size={}, overlap={})",
        segments.len(),
        chunk_size,
        overlap
    );

    Ok(segments)
}

fn close_segment(lines: &[BufferedLine]) -> Result<Segment> {
    let text = lines.iter().map(|l| l.text).collect::<Vec<_>>().join("\n");
    let start_timestamp = lines.iter().find_map(|l| l.timestamp);
    let start_seconds = start_timestamp.map(parse_timestamp).transpose()?;

    Ok(Segment {
        text,
        start_timestamp: start_timestamp.map(str::to_string),
        start_seconds,
    })
}
