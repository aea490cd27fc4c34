mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling settings passed to the generation model with each prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_output_tokens: u32,
}

impl GenerationOptions {
    /// Low-temperature, short output used for rolling segment summaries.
    pub fn summary() -> Self {
        Self {
            temperature: 0.3,
            top_p: None,
            max_output_tokens: 100,
        }
    }

    /// Settings used when asking for chapter markers.
    pub fn extraction() -> Self {
        Self {
            temperature: 0.25,
            top_p: Some(0.9),
            max_output_tokens: 200,
        }
    }
}

/// A text-generation model: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::ChapterError;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

    /// Deterministic generator that answers from a closure and records every call.
    pub struct ScriptedGenerator {
        responder: Responder,
        pub calls: Mutex<Vec<(String, GenerationOptions)>>,
    }

    impl ScriptedGenerator {
        pub fn new(responder: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
            Self {
                responder: Box::new(responder),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(reply: &str) -> Self {
            let reply = reply.to_string();
            Self::new(move |_| Ok(reply.clone()))
        }

        pub fn failing() -> Self {
            Self::new(|_| {
                Err(ChapterError::GenerationApi {
                    status: 500,
                    body: "model crashed".to_string(),
                })
            })
        }

        pub fn prompts(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _model: &str,
            prompt: &str,
            options: &GenerationOptions,
        ) -> Result<String> {
            self.calls.lock().unwrap().push((prompt.to_string(), *options));
            (self.responder)(prompt)
        }
    }
}
