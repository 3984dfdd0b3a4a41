// Interactive search presenter demo
//
// Every stdin line replaces the query; `/clear` dismisses the visible
// message. Searches run against a newline-separated catalog file (or a
// built-in list) with simulated latency.
//
// Usage: search-presenter [CATALOG_FILE] [CONFIG_JSON_FILE]

use anyhow::{Context, Result};
use search_presenter::{PresentationState, PresenterConfig, SearchPresenter, SearchSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const BUILTIN_CATALOG: &[&str] = &[
    "Batman",
    "Batman Begins",
    "Batman Returns",
    "Batman: The Animated Series",
    "The Dark Knight",
    "The Dark Knight Rises",
    "Gotham",
    "Superman",
    "Smallville",
];

/// Substring search over an in-memory catalog
struct Catalog {
    entries: Arc<Vec<String>>,
    latency: Duration,
}

impl SearchSource for Catalog {
    type Item = String;

    fn search(
        &self,
        query: String,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send {
        let entries = Arc::clone(&self.entries);
        let latency = self.latency;
        async move {
            tokio::time::sleep(latency).await;
            if entries.is_empty() {
                anyhow::bail!("catalog is empty");
            }
            let needle = query.to_lowercase();
            Ok(entries
                .iter()
                .filter(|entry| entry.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }
}

fn render(state: &PresentationState<String>) {
    let spinner = if state.refreshing { "…" } else { " " };
    println!(
        "{spinner} query={:?} results={}",
        state.query,
        state.results().len()
    );
    for entry in state.results().iter().take(5) {
        println!("    {entry}");
    }
    if let Some(message) = &state.message {
        println!("  ! {message} (type /clear to dismiss)");
    }
}

async fn load_catalog(path: Option<&str>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(BUILTIN_CATALOG.iter().map(ToString::to_string).collect());
    };
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog {path}"))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

async fn load_config(path: Option<&str>) -> Result<PresenterConfig> {
    let Some(path) = path else {
        return Ok(PresenterConfig::default());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {path}"))?;
    PresenterConfig::from_json(&json)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let entries = load_catalog(args.first().map(String::as_str)).await?;
    let config = load_config(args.get(1).map(String::as_str)).await?;
    tracing::info!(entries = entries.len(), "Catalog loaded");

    let presenter = SearchPresenter::start(
        Catalog {
            entries: Arc::new(entries),
            latency: Duration::from_millis(150),
        },
        config,
    );

    let mut states = presenter.subscribe();
    let renderer = tokio::spawn(async move {
        render(&states.borrow_and_update());
        while states.changed().await.is_ok() {
            render(&states.borrow_and_update());
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/clear" {
            if let Some(message) = presenter.state().message {
                presenter.clear_message(message.id)?;
            }
            continue;
        }
        presenter.update_query(line)?;
    }

    presenter.shutdown().await;
    renderer.await.context("Renderer task failed")?;
    Ok(())
}
