use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::error::AppError;
use crate::store::{SharedStore, Store};

/// Close every overdue open task and return how many were closed.
///
/// Tasks that are already done no longer match, so a second run with the same
/// `now` closes nothing.
pub async fn run_once(store: &dyn Store, now: DateTime<Utc>) -> Result<usize, AppError> {
    let closed = store.close_overdue_tasks(now).await?;
    for task in &closed {
        tracing::debug!(
            task_id = task.id,
            project_id = task.project_id,
            "Closed overdue task"
        );
    }
    Ok(closed.len())
}

/// Spawn the polling loop on the current runtime.
pub fn spawn(
    store: SharedStore,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(store, interval, shutdown))
}

/// Run the job every `interval` until `shutdown` flips to true.
pub async fn run(store: SharedStore, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    tracing::info!("Autoclose job started (every {}s)", interval.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        match run_once(store.as_ref(), Utc::now()).await {
            Ok(0) => tracing::debug!("Autoclose: no overdue tasks"),
            Ok(count) => tracing::info!("Autoclose: closed {count} overdue tasks"),
            Err(e) => tracing::error!("Autoclose run failed: {e}"),
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                // sender dropped
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!("Autoclose job stopped");
}
