//! HealthMonitor - Background probe of the AI service.
//!
//! Sends a tiny completion request on a fixed interval and records the
//! outcome in the dashboard store:
//!
//! | Outcome | Action |
//! |---------|--------|
//! | reply received | `StatusChecked { online: true, .. }` |
//! | transient error or probe timeout | `StatusChecked { online: false, .. }` |
//! | any other error | `StatusCheckFailed` |
//!
//! ## Shutdown
//!
//! [`HealthMonitor::spawn`] returns a handle; [`MonitorHandle::stop`] signals
//! the loop over a `watch` channel and waits for it to exit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::application::DashboardStore;
use crate::domain::dashboard::DashboardAction;
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

const PROBE_PROMPT: &str = "Reply with the single word: ok";

/// Configuration for the monitor loop.
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Time between probes.
    pub interval: Duration,
    /// Upper bound on a single probe.
    pub probe_timeout: Duration,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(10),
        }
    }
}

impl HealthMonitorConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

/// Periodic AI status checker.
pub struct HealthMonitor {
    ai_provider: Arc<dyn AIProvider>,
    store: DashboardStore,
    config: HealthMonitorConfig,
}

/// Handle to a running monitor.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Signals the loop to stop and waits for it.
    pub async fn stop(self) {
        // The receiver only disappears once the task has already exited.
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "health monitor task ended abnormally");
        }
    }
}

impl HealthMonitor {
    pub fn new(
        ai_provider: Arc<dyn AIProvider>,
        store: DashboardStore,
        config: HealthMonitorConfig,
    ) -> Self {
        Self {
            ai_provider,
            store,
            config,
        }
    }

    /// Starts the loop on the runtime.
    pub fn spawn(self) -> MonitorHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(shutdown_rx).await });
        MonitorHandle { shutdown, task }
    }

    /// Probes on every tick until the shutdown flag flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        info!(interval_secs = self.config.interval.as_secs(), "health monitor started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("health monitor stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.check_once().await;
                }
            }
        }
    }

    /// Runs one probe and records it. Returns the action dispatched.
    pub async fn check_once(&self) -> DashboardAction {
        let request = CompletionRequest::new(format!("health-{}", uuid::Uuid::new_v4()))
            .with_message(MessageRole::User, PROBE_PROMPT)
            .with_max_tokens(8);

        let started = Instant::now();
        let outcome = time::timeout(self.config.probe_timeout, self.ai_provider.complete(request)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let action = match outcome {
            Ok(Ok(_)) => {
                debug!(elapsed_ms, "AI service reachable");
                DashboardAction::StatusChecked {
                    online: true,
                    response_time_ms: elapsed_ms,
                }
            }
            Ok(Err(e)) if e.is_transient() => {
                warn!(error = %e, elapsed_ms, "AI service unreachable");
                DashboardAction::StatusChecked {
                    online: false,
                    response_time_ms: elapsed_ms,
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "AI status check failed");
                DashboardAction::StatusCheckFailed
            }
            Err(_) => {
                warn!(timeout_ms = self.config.probe_timeout.as_millis() as u64, "AI status check timed out");
                DashboardAction::StatusChecked {
                    online: false,
                    response_time_ms: elapsed_ms,
                }
            }
        };

        self.store.dispatch(action.clone()).await;
        action
    }
}
