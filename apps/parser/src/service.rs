use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{error, warn};

use crate::config::Config;
use crate::errors::ParseError;
use crate::lexicon::Lexicons;
use crate::loader::RawDocument;
use crate::pipeline::{DocumentParser, ResumeParser};
use crate::profile::CandidateProfile;

/// Runs parses on the blocking pool with a cap on concurrency and a
/// wall-clock limit per document. Cheap to clone; clones share the cap.
#[derive(Clone)]
pub struct ParserService {
    parser: Arc<dyn DocumentParser>,
    limiter: Arc<Semaphore>,
    timeout: Duration,
}

impl ParserService {
    pub fn new(parser: Arc<dyn DocumentParser>, workers: usize, timeout: Duration) -> Self {
        Self {
            parser,
            limiter: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
        }
    }

    pub fn from_config(config: &Config, lexicons: Arc<Lexicons>) -> Self {
        Self::new(
            Arc::new(ResumeParser::new(lexicons)),
            config.workers,
            config.parse_timeout,
        )
    }

    /// Parses one document. The timeout covers the parse itself, not the
    /// wait for a free worker.
    pub async fn parse(&self, document: RawDocument) -> Result<CandidateProfile, ParseError> {
        let permit = Arc::clone(&self.limiter)
            .acquire_owned()
            .await
            .map_err(|_| ParseError::WorkerUnavailable)?;

        let parser = Arc::clone(&self.parser);
        let format = document.format;
        // The permit travels with the blocking task: a timed-out parse keeps
        // its worker slot until the thread actually finishes.
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            parser.parse(&document)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                error!(%format, "parse task failed: {join_err}");
                Err(ParseError::Internal(anyhow::anyhow!(
                    "parse task failed: {join_err}"
                )))
            }
            Err(_) => {
                warn!(%format, timeout_secs = self.timeout.as_secs_f64(), "parse timed out");
                Err(ParseError::Timeout(self.timeout))
            }
        }
    }

    /// Parses documents concurrently (bounded by the worker cap). Results
    /// come back in input order; one failure does not affect the others.
    pub async fn parse_batch(
        &self,
        documents: Vec<RawDocument>,
    ) -> Vec<Result<CandidateProfile, ParseError>> {
        let handles: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let service = self.clone();
                tokio::spawn(async move { service.parse(document).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap_or_else(|join_err| {
                Err(ParseError::Internal(anyhow::anyhow!(
                    "batch task failed: {join_err}"
                )))
            }));
        }
        results
    }
}
