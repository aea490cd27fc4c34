use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use snortstamper_lib::{format_chapters, ChapterGenerator, ChapterSettings, Config, OllamaClient};

/// SnortStamper - YouTube chapters from timestamped transcripts
///
/// Reads a transcript whose lines start with `[M:SS]` or `[H:MM:SS]` and prints
/// chapter markers ready to paste into a video description.
#[derive(Parser, Debug)]
#[command(name = "snortstamper")]
#[command(version)]
#[command(
    about = "Generate video chapter markers from a timestamped transcript",
    long_about = None
)]
struct Args {
    /// Transcript file (.txt), or `-` to read from stdin
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Ollama model name
    #[arg(long)]
    model: Option<String>,

    /// Segment size in characters
    #[arg(long, value_name = "CHARS")]
    chunk_size: Option<usize>,

    /// Segments longer than this carry their tail into the next one
    #[arg(long, value_name = "CHARS")]
    overlap: Option<usize>,

    /// Base URL of the Ollama server
    #[arg(long, value_name = "URL")]
    ollama_url: Option<String>,

    /// Configuration file (defaults to <config dir>/snortstamper/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print chapters as JSON instead of description lines
    #[arg(long)]
    json: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => match Config::default_path() {
                Some(path) => Config::load_or_default(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?,
                None => Config::default(),
            },
        }
        .with_env_overrides();

        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap;
        }
        if let Some(url) = &self.ollama_url {
            config.ollama.url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_transcript(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read transcript from stdin")?;
        buffer
    } else {
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            bail!("Please provide a .txt transcript file: {}", path.display());
        }
        std::fs::read(path)
            .with_context(|| format!("Failed to read transcript {}", path.display()))?
    };

    let transcript = String::from_utf8(bytes).context("Transcript is not valid UTF-8")?;
    if transcript.trim().is_empty() {
        bail!("Transcript file is empty");
    }
    Ok(transcript)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    let transcript = read_transcript(&args.transcript)?;

    let client = OllamaClient::new(&config.ollama).context("Failed to build Ollama client")?;
    let generator = ChapterGenerator::new(client, ChapterSettings::from(&config));

    let chapters = generator
        .generate_chapters(&transcript)
        .await
        .context("Error generating timestamps")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
    } else {
        println!("{}", format_chapters(&chapters));
    }

    Ok(())
}
