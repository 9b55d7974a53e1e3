/// Public library interface for the habit progress engine
///
/// This module exports the date-range and streak engine, the snapshot
/// types it consumes, and the MCP server that exposes it as tools.

use thiserror::Error;

pub mod analytics;
pub mod config;
pub mod domain;
pub mod mcp;
pub mod snapshot;
pub mod tools;

// Re-export public modules and types
pub use analytics::{
    best_streak, build_index, completion_rate, current_streak, daily_breakdown, habit_completion_rate,
    period_delta, AnalyticsEngine, CompletionIndex, DayTotal, HabitProgress, HabitStreak, ProgressReport,
};
pub use config::{Config, ConfigError, EngineConfig};
pub use domain::*;
pub use snapshot::{JsonFileSource, Snapshot, SnapshotError, SnapshotSource};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Holds the current snapshot and the index derived from it
///
/// The index is rebuilt from scratch whenever the snapshot is replaced; no
/// statistics are carried between snapshots.
pub struct ProgressServer {
    snapshot: Snapshot,
    index: CompletionIndex,
    analytics: AnalyticsEngine,
    today: Option<DayId>,
}

impl ProgressServer {
    /// Create a server with an empty snapshot
    pub fn new(config: EngineConfig) -> Result<Self, ServerError> {
        config.validate()?;
        tracing::info!("Initializing progress engine (all-time window: {} days)", config.all_time_days);

        Ok(Self {
            snapshot: Snapshot::default(),
            index: CompletionIndex::default(),
            analytics: AnalyticsEngine::new(config),
            today: None,
        })
    }

    /// Preload a snapshot from any source
    pub fn load_from<S: SnapshotSource>(&mut self, source: &S) -> Result<(), ServerError> {
        let snapshot = source.load()?;
        self.replace_snapshot(snapshot);
        Ok(())
    }

    /// Pin the reference day instead of reading the local clock
    pub fn with_today(mut self, today: DayId) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.replace_snapshot(snapshot);
        self
    }

    /// Swap in a new snapshot and rebuild the completion index
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.index = snapshot.index();
        self.snapshot = snapshot;
        tracing::info!(
            "Snapshot replaced: {} habits, {} records, {} habits with completions",
            self.snapshot.habits.len(),
            self.snapshot.records.len(),
            self.index.habit_count()
        );
    }

    /// The reference day used when a request gives no anchor
    pub fn today(&self) -> DayId {
        self.today
            .unwrap_or_else(|| DayId::from(chrono::Local::now().date_naive()))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn index(&self) -> &CompletionIndex {
        &self.index
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    /// Borrow the state tools run against
    pub fn context(&self) -> tools::ToolContext<'_> {
        tools::ToolContext {
            snapshot: &self.snapshot,
            index: &self.index,
            engine: &self.analytics,
            today: self.today(),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Starting MCP server with {} habits loaded",
            self.snapshot.habits.len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }
}
