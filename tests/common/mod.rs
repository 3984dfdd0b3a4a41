//! Test utilities shared by the presenter integration tests

use parking_lot::Mutex;
use search_presenter::{PresentationState, SearchPresenter, SearchSource};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// What a scripted query does once its delay has elapsed
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Outcome {
    Results(Vec<String>),
    Fail(String),
    Panic(String),
}

#[derive(Debug, Clone)]
struct Script {
    delay: Duration,
    outcome: Outcome,
}

/// One recorded invocation of the search collaborator
#[derive(Debug, Clone)]
pub struct Call {
    pub query: String,
    /// Time since the source was created
    pub at: Duration,
}

#[derive(Debug)]
struct Inner {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<Call>>,
    created: Instant,
}

/// Search collaborator with per-query latency and outcome
///
/// Unscripted queries answer immediately with `"{query} result"`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    inner: Arc<Inner>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                scripts: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
                created: Instant::now(),
            }),
        }
    }

    fn script(&self, query: &str, delay: Duration, outcome: Outcome) {
        self.inner
            .scripts
            .lock()
            .insert(query.to_string(), Script { delay, outcome });
    }

    pub fn respond(&self, query: &str, delay: Duration, results: &[&str]) {
        let results = results.iter().map(ToString::to_string).collect();
        self.script(query, delay, Outcome::Results(results));
    }

    pub fn fail(&self, query: &str, delay: Duration, cause: &str) {
        self.script(query, delay, Outcome::Fail(cause.to_string()));
    }

    pub fn panic_on(&self, query: &str, delay: Duration, detail: &str) {
        self.script(query, delay, Outcome::Panic(detail.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.query).collect()
    }
}

impl SearchSource for ScriptedSource {
    type Item = String;

    fn search(&self, query: String) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send {
        self.inner.calls.lock().push(Call {
            query: query.clone(),
            at: self.inner.created.elapsed(),
        });
        let script = self
            .inner
            .scripts
            .lock()
            .get(&query)
            .cloned()
            .unwrap_or_else(|| Script {
                delay: Duration::ZERO,
                outcome: Outcome::Results(vec![format!("{query} result")]),
            });

        async move {
            tokio::time::sleep(script.delay).await;
            match script.outcome {
                Outcome::Results(results) => Ok(results),
                Outcome::Fail(cause) => Err(anyhow::anyhow!(cause)),
                Outcome::Panic(detail) => panic!("{detail}"),
            }
        }
    }
}

#[allow(dead_code)]
pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Let the driver process everything that is ready at the current instant
#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[allow(dead_code)]
pub fn results(state: &PresentationState<String>) -> Vec<String> {
    state.results().to_vec()
}

#[allow(dead_code)]
pub fn start(source: &ScriptedSource) -> SearchPresenter<ScriptedSource> {
    SearchPresenter::with_defaults(source.clone())
}
