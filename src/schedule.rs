//! Cron-driven trigger loop.
//!
//! At most one tick runs at a time: a trigger that fires while the previous tick is still busy
//! is dropped and logged.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::foundation::error::{QuotegramError, QuotegramResult};

/// Production cadence: every minute.
pub const DEFAULT_CRON: &str = "* * * * *";
/// Test cadence: every 20 seconds.
pub const DEFAULT_TEST_CRON: &str = "*/20 * * * * *";

/// Parse a cron expression.
///
/// Five-field expressions (minute first) fire at second zero; six and seven field expressions
/// start with seconds.
pub fn parse_cron(expr: &str) -> QuotegramResult<Schedule> {
    let trimmed = expr.trim();
    let normalized = match trimmed.split_whitespace().count() {
        5 => format!("0 {trimmed}"),
        _ => trimmed.to_string(),
    };
    Schedule::from_str(&normalized)
        .map_err(|e| QuotegramError::config(format!("invalid cron expression '{expr}': {e}")))
}

/// Fires a task on every cron trigger, skipping triggers that overlap a running task.
#[derive(Clone, Debug)]
pub struct Scheduler {
    schedule: Schedule,
    expression: String,
    busy: Arc<AtomicBool>,
}

struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Scheduler {
    /// Scheduler for `expr`.
    pub fn new(expr: &str) -> QuotegramResult<Self> {
        Ok(Self {
            schedule: parse_cron(expr)?,
            expression: expr.trim().to_string(),
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Expression this scheduler was built from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First trigger strictly after `after`.
    pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }

    /// Whether a task is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Spawn `tick` unless a previous one is still running.
    ///
    /// Returns `None` when the trigger was dropped. A failed tick is logged at error level.
    pub fn try_start<Fut>(&self, tick: Fut) -> Option<tokio::task::JoinHandle<()>>
    where
        Fut: Future<Output = QuotegramResult<()>> + Send + 'static,
    {
        if self.busy.swap(true, Ordering::AcqRel) {
            tracing::warn!(cron = %self.expression, "previous tick still running; trigger dropped");
            return None;
        }
        let guard = BusyGuard(Arc::clone(&self.busy));
        Some(tokio::spawn(async move {
            let _guard = guard;
            let started = std::time::Instant::now();
            let result = tick.await;
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match result {
                Ok(()) => tracing::debug!(elapsed_ms, "tick finished"),
                Err(e) => tracing::error!(error = %e, elapsed_ms, "tick failed"),
            }
        }))
    }

    /// Run `task` on every trigger until `shutdown` resolves.
    ///
    /// A task still running at shutdown is awaited before this returns.
    pub async fn run<F, Fut, S>(&self, task: F, shutdown: S) -> QuotegramResult<()>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = QuotegramResult<()>> + Send + 'static,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(cron = %self.expression, "scheduler started");
        let mut in_flight: Option<tokio::task::JoinHandle<()>> = None;
        loop {
            let now = Utc::now();
            let Some(next) = self.next_fire(now) else {
                tracing::warn!(cron = %self.expression, "schedule has no upcoming triggers");
                return Ok(());
            };
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tracing::debug!(next = %next, "waiting for next trigger");

            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("scheduler stopping");
                    if let Some(handle) = in_flight.take()
                        && !handle.is_finished()
                    {
                        tracing::info!("waiting for in-flight tick");
                        if let Err(e) = handle.await {
                            tracing::error!(error = %e, "in-flight tick aborted");
                        }
                    }
                    return Ok(());
                }
                () = tokio::time::sleep(wait) => {}
            }
            if let Some(handle) = self.try_start(task()) {
                in_flight = Some(handle);
            }
        }
    }
}

/// Resolves when the process receives Ctrl-C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c; stopping");
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule/schedule.rs"]
mod tests;
