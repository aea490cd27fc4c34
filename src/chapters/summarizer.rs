use tracing::warn;

use crate::generation::{GenerationOptions, TextGenerator};

/// Only the head of a segment is shown to the model when summarizing.
const SUMMARY_INPUT_CHARS: usize = 1500;

fn build_summary_prompt(segment_text: &str) -> String {
    let excerpt: String = segment_text.chars().take(SUMMARY_INPUT_CHARS).collect();
    format!(
        "Summarize the main topics covered in this transcript segment in 2-3 sentences. \
         Focus on what was discussed, not how it was presented.\n\n\
         Transcript:\n{}\n\nBrief summary:",
        excerpt
    )
}

/// Ask the model for a short synopsis of a segment, used as context for the next one.
/// Returns an empty string when the model call fails.
pub async fn summarize_segment(
    generator: &dyn TextGenerator,
    model: &str,
    segment_text: &str,
) -> String {
    let prompt = build_summary_prompt(segment_text);

    match generator.generate(model, &prompt, &GenerationOptions::summary()).await {
        Ok(summary) => summary.trim().to_string(),
        Err(e) => {
            warn!("Could not generate segment summary: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::ScriptedGenerator;

    #[tokio::test]
    async fn test_summary_is_trimmed() {
        let generator = ScriptedGenerator::replying("  They set up the project.  \n");
        let summary = summarize_segment(&generator, "mistral", "[0:00] hi").await;
        assert_eq!(summary, "They set up the project.");
    }

    #[tokio::test]
    async fn test_summary_uses_low_temperature_and_short_output() {
        let generator = ScriptedGenerator::replying("ok");
        summarize_segment(&generator, "mistral", "[0:00] hi").await;

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, GenerationOptions::summary());
    }

    #[tokio::test]
    async fn test_segment_text_is_truncated() {
        let generator = ScriptedGenerator::replying("ok");
        let text = format!("{}{}", "a".repeat(SUMMARY_INPUT_CHARS), "TAIL_MARKER");
        summarize_segment(&generator, "mistral", &text).await;

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains(&"a".repeat(SUMMARY_INPUT_CHARS)));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_failure_yields_empty_summary() {
        let generator = ScriptedGenerator::failing();
        let summary = summarize_segment(&generator, "mistral", "[0:00] hi").await;
        assert!(summary.is_empty());
    }
}
