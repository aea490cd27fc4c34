use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::extractor::extract_chapters;
use super::reconcile::reconcile_chapters;
use super::segmenter::segment_transcript;
use super::summarizer::summarize_segment;
use super::ChapterCandidate;
use crate::config::Config;
use crate::error::{ChapterError, Result};
use crate::generation::TextGenerator;

/// State carried from one segment to the next within a single run.
#[derive(Debug, Clone, Default)]
pub struct RunningContext {
    chapters: Vec<ChapterCandidate>,
    summary: Option<String>,
}

impl RunningContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last `count` accepted chapters, oldest first.
    pub fn recent_chapters(&self, count: usize) -> &[ChapterCandidate] {
        let start = self.chapters.len().saturating_sub(count);
        &self.chapters[start..]
    }

    pub fn record_chapters(&mut self, chapters: &[ChapterCandidate]) {
        self.chapters.extend_from_slice(chapters);
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }

    /// Replace the rolling summary with the one for the segment just processed.
    pub fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSettings {
    pub model: String,
    pub chunk_size: usize,
    pub overlap: usize,
}

impl From<&Config> for ChapterSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            chunk_size: config.chunk_size,
            overlap: config.overlap,
        }
    }
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Turns a timestamped transcript into a chapter list using a text-generation model.
///
/// Holds no per-run state: every call to [`ChapterGenerator::generate_chapters`] starts
/// from an empty [`RunningContext`], so one generator can serve many transcripts.
pub struct ChapterGenerator<G: TextGenerator> {
    generator: G,
    settings: ChapterSettings,
}

impl<G: TextGenerator> ChapterGenerator<G> {
    pub fn new(generator: G, settings: ChapterSettings) -> Self {
        Self { generator, settings }
    }

    pub fn settings(&self) -> &ChapterSettings {
        &self.settings
    }

    pub fn text_generator(&self) -> &G {
        &self.generator
    }

    pub async fn generate_chapters(&self, transcript: &str) -> Result<Vec<ChapterCandidate>> {
        if transcript.trim().is_empty() {
            return Err(ChapterError::EmptyTranscript);
        }

        let run_id = Uuid::new_v4();
        self.run(transcript)
            .instrument(info_span!("chapter_run", %run_id))
            .await
    }

    async fn run(&self, transcript: &str) -> Result<Vec<ChapterCandidate>> {
        let start_time = std::time::Instant::now();
        let model = self.settings.model.as_str();

        info!("Analyzing transcript structure...");
        let segments =
            segment_transcript(transcript, self.settings.chunk_size, self.settings.overlap)?;
        let total = segments.len();
        info!("Split into {} overlapping segments", total);

        let mut context = RunningContext::new();
        let mut all_chapters: Vec<ChapterCandidate> = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            info!(
                "[{}/{}] Processing segment starting at [{}]",
                i + 1,
                total,
                segment.start_timestamp.as_deref().unwrap_or("?")
            );

            let chapters =
                extract_chapters(&self.generator, model, segment, i, total, &context).await;

            if chapters.is_empty() {
                info!("  -> No major chapters in this segment");
            } else {
                info!("  -> Found {} chapter(s)", chapters.len());
                for chapter in &chapters {
                    info!("     [{}] {}", chapter.timestamp, chapter.title);
                }
            }

            context.record_chapters(&chapters);
            all_chapters.extend(chapters);

            if i + 1 < total {
                let summary = summarize_segment(&self.generator, model, &segment.text).await;
                context.set_summary(summary);
            }
        }

        let final_chapters = reconcile_chapters(all_chapters);
        info!(
            "Generated {} final chapters in {:.1}s",
            final_chapters.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(final_chapters)
    }
}

/// Render chapters as `<timestamp> <title>` lines for a video description.
pub fn format_chapters(chapters: &[ChapterCandidate]) -> String {
    chapters
        .iter()
        .map(|c| format!("{} {}", c.timestamp, c.title))
        .collect::<Vec<_>>()
        .join("\n")
}
