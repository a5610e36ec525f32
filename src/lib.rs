//! Brushsense - Headless brushing-coach service
//!
//! Ingests facial landmark frames from an external face tracker, classifies
//! toothbrushing motion over a sliding position window, and publishes a
//! quality score plus coaching feedback:
//! - JSON-over-UDP landmark ingestion from an external tracker process
//! - per-frame mouth feature extraction (openness, center)
//! - windowed motion classification with score and feedback bookkeeping
//! - a four-zone session schedule driving zone-specific coaching

pub mod analysis;
pub mod config;
pub mod error;
pub mod session;
pub mod tracking;

pub use config::Config;
pub use error::{BrushsenseError, Result};

use tokio::sync::{broadcast, RwLock};

use analysis::AnalysisState;

/// Application state shared across all components
#[derive(Debug)]
pub struct AppState {
    /// Current configuration
    pub config: RwLock<Config>,
    /// Latest published analysis state
    pub analysis: RwLock<AnalysisState>,
    /// Channel for analysis state updates
    pub state_tx: broadcast::Sender<AnalysisState>,
    /// Shutdown signal
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Create a new application state with the given configuration
    pub fn new(config: Config) -> std::sync::Arc<Self> {
        let (state_tx, _) = broadcast::channel(64);
        let (shutdown_tx, _) = broadcast::channel(1);

        std::sync::Arc::new(Self {
            config: RwLock::new(config),
            analysis: RwLock::new(AnalysisState::default()),
            state_tx,
            shutdown_tx,
        })
    }

    /// Update the analysis state and broadcast the change
    pub async fn update_analysis(&self, state: AnalysisState) {
        let mut current = self.analysis.write().await;
        *current = state.clone();
        let _ = self.state_tx.send(state);
    }

    /// Get the latest analysis state
    pub async fn get_analysis(&self) -> AnalysisState {
        self.analysis.read().await.clone()
    }

    /// Subscribe to analysis state changes
    pub fn subscribe_state(&self) -> broadcast::Receiver<AnalysisState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to shutdown signal
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_and_get_analysis() {
        let state = AppState::new(Config::default());

        let mut rx = state.subscribe_state();

        let update = AnalysisState {
            score: 3,
            feedback: "test".to_string(),
            is_correct_motion: true,
        };
        state.update_analysis(update.clone()).await;

        assert_eq!(state.get_analysis().await, update);
        assert_eq!(rx.recv().await.unwrap(), update);
    }

    #[tokio::test]
    async fn test_shutdown_broadcast() {
        let state = AppState::new(Config::default());
        let mut rx = state.subscribe_shutdown();
        state.shutdown();
        assert!(rx.recv().await.is_ok());
    }
}
