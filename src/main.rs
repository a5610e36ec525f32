//! Brushsense - Headless brushing-coach service
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brushsense::{
    analysis::BrushingAnalyzer,
    config::Config,
    session::{SessionClock, SessionSummary, TimeOfDay, Zone},
    tracking::LandmarkReceiver,
    AppState,
};

/// Brushsense - scores toothbrushing motion from facial landmark streams
#[derive(Parser, Debug)]
#[command(name = "brushsense", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Landmark receiver UDP port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds per brushing zone (overrides config)
    #[arg(long)]
    zone_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", brushsense::NAME, brushsense::VERSION);

    // Load configuration
    let mut config = if let Some(ref path) = args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.tracking.port = port;
    }
    if let Some(zone_secs) = args.zone_secs {
        config.session.zone_duration_secs = zone_secs;
    }

    config.validate()?;

    info!("Landmark receiver port: {}", config.tracking.port);
    info!("Zone duration: {}s", config.session.zone_duration_secs);

    // Create shared application state
    let state = AppState::new(config);

    // Start the tracking/analysis task
    let tracking_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = run_tracking(tracking_state).await {
            error!("Tracking error: {}", e);
        }
    });

    // Wait for Ctrl+C / SIGTERM or internal completion
    let mut shutdown_rx = state.subscribe_shutdown();
    tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            state.shutdown();
        }
        _ = shutdown_rx.recv() => {}
    }

    // Give tasks a moment to clean up
    tokio::time::sleep(Duration::from_millis(500)).await;

    info!("Brushsense stopped");
    Ok(())
}

/// Receive landmark frames, run the analyzer, and publish state updates.
///
/// The session clock starts on the first received packet; the active zone
/// follows elapsed session time. The task requests shutdown once the
/// session schedule has run to completion.
async fn run_tracking(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = state.config.read().await;
    let tracking_config = config.tracking.clone();
    let clock = SessionClock::new(&config.session);
    drop(config);

    let mut shutdown_rx = state.subscribe_shutdown();

    let mut receiver = LandmarkReceiver::new(&tracking_config);
    receiver.start()?;

    let mut analyzer = BrushingAnalyzer::new();
    let mut session_start: Option<Instant> = None;
    let mut last_zone: Option<Zone> = None;

    info!("Waiting for landmark packets to start the session");

    loop {
        tokio::select! {
            result = receiver.process() => {
                match result {
                    Ok(Some(data)) if data.has_data => {
                        let started = *session_start.get_or_insert_with(|| {
                            info!("Tracker connected, session started");
                            Instant::now()
                        });
                        let elapsed = started.elapsed();

                        if clock.is_complete(elapsed) {
                            let final_state = state.get_analysis().await;
                            let summary = SessionSummary::new(
                                true,
                                clock.total(),
                                final_state.score,
                                TimeOfDay::now(),
                            );
                            info!(
                                "Session complete: score {}/100, {} points earned",
                                summary.final_score, summary.points
                            );
                            state.shutdown();
                            break;
                        }

                        let zone = clock.zone_at(elapsed);
                        if last_zone != Some(zone) {
                            info!("Now brushing: {}", zone);
                            last_zone = Some(zone);
                        }

                        let current = state.get_analysis().await;
                        let new_state = analyzer.update(data.frame(), zone, true);
                        if new_state != current {
                            if new_state.feedback != current.feedback {
                                debug!("Feedback: {}", new_state.feedback);
                            }
                            state.update_analysis(new_state).await;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Landmark receive error: {}", e);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                if let Some(started) = session_start {
                    let elapsed = started.elapsed();
                    if !clock.is_complete(elapsed) {
                        let summary = SessionSummary::new(
                            false,
                            elapsed,
                            analyzer.state().score,
                            TimeOfDay::now(),
                        );
                        info!(
                            "Session aborted after {}s: score {}/100, {} points",
                            summary.duration_secs, summary.final_score, summary.points
                        );
                    }
                }
                info!("Tracking shutting down");
                break;
            }
        }

        // Small yield to avoid busy-spinning when no data arrives
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    receiver.stop();
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
