//! Level loading. A level is one JSON partition (`data/n3.json`); the "all"
//! selector merges every partition and dedupes by kanji.

use crate::config::{DATA_DIR, PARTITIONS};
use crate::item::{Item, decode_items, dedupe_by_kanji, fallback_items};
use gloo_net::http::Request;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSelector {
    All,
    Level(String),
}

impl LevelSelector {
    /// Selector value from the level dropdown; empty means "all".
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" {
            Self::All
        } else {
            Self::Level(raw.to_string())
        }
    }
}

impl fmt::Display for LevelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Level(id) => f.write_str(id),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Network(String),
    Status { partition: String, status: u16 },
    Parse(String),
    Empty,
}

impl LoadError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Status { partition, status } => {
                write!(f, "HTTP {} while fetching partition '{}'", status, partition)
            }
            Self::Parse(msg) => write!(f, "invalid level data: {}", msg),
            Self::Empty => f.write_str("no items loaded"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Where partitions come from. The browser build fetches over HTTP; tests use
/// an in-memory map.
#[allow(async_fn_in_trait)]
pub trait PartitionSource {
    async fn fetch(&self, partition: &str) -> Result<Vec<Item>, LoadError>;
}

pub fn partition_url(partition: &str) -> String {
    format!("{}/{}.json", DATA_DIR, partition)
}

/// Fetches `data/<partition>.json` relative to the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl PartitionSource for HttpSource {
    async fn fetch(&self, partition: &str) -> Result<Vec<Item>, LoadError> {
        let url = partition_url(partition);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(LoadError::network)?;

        if !response.ok() {
            return Err(LoadError::Status {
                partition: partition.to_owned(),
                status: response.status(),
            });
        }

        let text = response.text().await.map_err(LoadError::network)?;
        decode_items(&text).map_err(LoadError::parse)
    }
}

pub async fn load<S: PartitionSource>(
    source: &S,
    selector: &LevelSelector,
) -> Result<Vec<Item>, LoadError> {
    match selector {
        LevelSelector::All => {
            let mut merged = Vec::new();
            for partition in PARTITIONS {
                match source.fetch(partition).await {
                    Ok(items) => merged.extend(items),
                    Err(err) => log::warn!("skipping partition {}: {}", partition, err),
                }
            }
            let items = dedupe_by_kanji(merged);
            if items.is_empty() {
                return Err(LoadError::Empty);
            }
            Ok(items)
        }
        LevelSelector::Level(id) => {
            let items = source.fetch(id).await?;
            if items.is_empty() {
                return Err(LoadError::Empty);
            }
            Ok(items)
        }
    }
}

/// Like [`load`], but never fails: any error yields the built-in sample set.
pub async fn load_or_fallback<S: PartitionSource>(source: &S, selector: &LevelSelector) -> Vec<Item> {
    match load(source, selector).await {
        Ok(items) => {
            log::info!("loaded {} items for level {}", items.len(), selector);
            items
        }
        Err(err) => {
            log::warn!(
                "could not load level {} ({}); add level files under /{}; using sample items",
                selector,
                err,
                DATA_DIR
            );
            fallback_items()
        }
    }
}
