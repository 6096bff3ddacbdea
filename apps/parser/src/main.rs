use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_parser::config::Config;
use resume_parser::{
    DocumentFormat, DocumentLoadError, Lexicons, ParseError, ParserService, RawDocument,
};

/// Extract a structured candidate profile from resume files.
#[derive(Parser, Debug)]
#[command(name = "resume-parser", version)]
struct Cli {
    /// Force the input format for every file (pdf, docx, rtf, txt).
    #[arg(long)]
    format: Option<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Resume files to parse.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume parser v{}", env!("CARGO_PKG_VERSION"));

    let forced_format = cli
        .format
        .as_deref()
        .map(DocumentFormat::from_extension)
        .transpose()
        .context("invalid --format")?;

    let lexicons = match &config.lexicon_dir {
        Some(dir) => {
            info!("Loading lexicons from {}", dir.display());
            Lexicons::from_dir(dir)?
        }
        None => Lexicons::builtin(),
    };
    info!(
        workers = config.workers,
        timeout_secs = config.parse_timeout.as_secs(),
        "Parser service initialized"
    );
    let service = ParserService::from_config(&config, Arc::new(lexicons));

    let mut entries: Vec<Value> = Vec::with_capacity(cli.files.len());
    let mut documents = Vec::new();
    let mut pending = Vec::new();
    for path in &cli.files {
        match read_document(path, forced_format).await {
            Ok(document) => {
                pending.push(entries.len());
                entries.push(Value::Null);
                documents.push(document);
            }
            Err(err) => {
                warn!(file = %path.display(), "{err:#}");
                let entry = match err.downcast::<DocumentLoadError>() {
                    Ok(load) => parse_error_entry(path, &ParseError::Load(load)),
                    Err(err) => error_entry(path, "READ_FAILED", &format!("{err:#}")),
                };
                entries.push(entry);
            }
        }
    }

    let results = service.parse_batch(documents).await;
    for (slot, result) in pending.into_iter().zip(results) {
        let path = &cli.files[slot];
        entries[slot] = match result {
            Ok(profile) => json!({ "file": path.display().to_string(), "profile": profile }),
            Err(err) => {
                warn!(file = %path.display(), code = err.code(), "{err}");
                parse_error_entry(path, &err)
            }
        };
    }

    let output = Value::Array(entries);
    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");

    Ok(())
}

/// Reads a file and decides its format: the `--format` flag, then the
/// extension, then magic bytes, then plain text.
async fn read_document(path: &Path, forced: Option<DocumentFormat>) -> Result<RawDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    if let Some(format) = forced {
        return Ok(RawDocument::new(bytes, format));
    }
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(DocumentFormat::from_extension);
    match by_extension {
        Some(Ok(format)) => Ok(RawDocument::new(bytes, format)),
        Some(Err(err)) if is_legacy_doc(path) => Err(err.into()),
        _ => Ok(RawDocument::sniffed(bytes)),
    }
}

fn is_legacy_doc(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("doc"))
}

fn parse_error_entry(path: &Path, err: &ParseError) -> Value {
    error_entry(path, err.code(), &err.to_string())
}

fn error_entry(path: &Path, code: &str, message: &str) -> Value {
    json!({
        "file": path.display().to_string(),
        "error": { "code": code, "message": message },
    })
}
