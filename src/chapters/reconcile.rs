use super::ChapterCandidate;

/// Candidates closer than this many seconds are treated as the same chapter.
pub const DUPLICATE_WINDOW_SECS: u64 = 45;

/// Collapse near-duplicate chapters in a list sorted by `timestamp_seconds`.
///
/// Each candidate is compared with the last kept entry only. Within the window the longer
/// title wins; on equal length the earlier entry is kept.
pub fn deduplicate_chapters(chapters: &[ChapterCandidate]) -> Vec<ChapterCandidate> {
    let mut unique: Vec<ChapterCandidate> = Vec::with_capacity(chapters.len());

    for chapter in chapters {
        if let Some(last) = unique.last_mut() {
            let time_diff = chapter.timestamp_seconds.abs_diff(last.timestamp_seconds);
            if time_diff < DUPLICATE_WINDOW_SECS {
                if chapter.title.chars().count() > last.title.chars().count() {
                    *last = chapter.clone();
                }
                continue;
            }
        }

        unique.push(chapter.clone());
    }

    unique
}

/// Sort all candidates by time (stable) and collapse near-duplicates.
pub fn reconcile_chapters(mut chapters: Vec<ChapterCandidate>) -> Vec<ChapterCandidate> {
    chapters.sort_by_key(|c| c.timestamp_seconds);
    deduplicate_chapters(&chapters)
}
