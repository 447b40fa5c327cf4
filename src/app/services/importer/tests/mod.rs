//! Tests for the import pipeline, with an in-memory fetcher


use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::app::services::importer::SourceFetcher;
use crate::config::Config;
use crate::{Error, Result};

pub const CONFIRMED: &str = "mem://confirmed";
pub const DEATHS: &str = "mem://deaths";
pub const RECOVERED: &str = "mem://recovered";

pub const CONFIRMED_CSV: &str = "\
Province/State,Country/Region,Lat,Long,3/7/23,3/8/23,3/9/23
Alabama,US,32.3,-86.9,10,20,100
California,US,36.1,-119.6,30,40,250
,France,46.2,2.2,1000,1500,1200
Corsica,France,42.0,9.0,5,5,5
,Korea South,35.9,127.7,7,8,9
";

pub const DEATHS_CSV: &str = "\
Province/State,Country/Region,Lat,Long,3/7/23,3/8/23,3/9/23
Alabama,US,32.3,-86.9,1,2,3
California,US,36.1,-119.6,1,1,2
,France,46.2,2.2,10,12,15
";

pub const RECOVERED_CSV: &str = "\
Province/State,Country/Region,Lat,Long,3/7/23,3/8/23,3/9/23
,France,46.2,2.2,100,200,300
";

/// Serves source text from memory and counts fetches
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    sources: HashMap<String, String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher serving all three standard sources
    pub fn standard() -> Self {
        Self::new()
            .with_source(CONFIRMED, CONFIRMED_CSV)
            .with_source(DEATHS, DEATHS_CSV)
            .with_source(RECOVERED, RECOVERED_CSV)
    }

    pub fn with_source(mut self, locator: &str, text: &str) -> Self {
        self.sources.insert(locator.to_string(), text.to_string());
        self
    }

    pub fn without_source(mut self, locator: &str) -> Self {
        self.sources.remove(locator);
        self
    }

    /// Sleep before answering, to widen concurrency windows
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl SourceFetcher for MemoryFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sources
            .get(locator)
            .cloned()
            .ok_or_else(|| Error::source_fetch(locator, "connection refused"))
    }
}

/// Config pointing at the in-memory sources
pub fn memory_config() -> Config {
    Config::default().with_sources(Some(CONFIRMED), Some(DEATHS), Some(RECOVERED))
}

/// Base URL of a server that accepts connections and never answers
pub async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}
