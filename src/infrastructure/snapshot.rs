//! Periodic snapshot exporter.
//!
//! Copies the live store into a rotating set of weekday-named files so an
//! external job can ship them off-host. The rotation keeps seven slots,
//! Monday-based (`0.sqlite3` .. `6.sqlite3`), so a full week of restore
//! points exists before a slot is overwritten.

use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::domain::repositories::GeocodeRepository;
use crate::error::AppError;

/// Runs the snapshot exporter until the process shuts down.
///
/// Spawned once at startup when a snapshot directory is configured. A failed
/// export is logged and retried on the next tick; it never takes the worker
/// down.
pub async fn run_snapshot_worker(
    repository: Arc<dyn GeocodeRepository>,
    directory: PathBuf,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Consume the immediate first tick; the first export happens one full
    // interval after startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if let Err(e) = write_snapshot(repository.as_ref(), &directory).await {
            tracing::error!(error = %e, "snapshot export failed");
        }
    }
}

/// Writes one consistent snapshot into today's weekday slot.
///
/// The copy lands in a staging file first and is renamed into place, so the
/// slot always holds a complete snapshot even if the process dies mid-copy.
pub async fn write_snapshot(
    repository: &dyn GeocodeRepository,
    directory: &Path,
) -> Result<(), AppError> {
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| AppError::internal(format!("cannot create snapshot directory: {e}")))?;

    let slot = Utc::now().weekday().num_days_from_monday();
    let destination = directory.join(format!("{slot}.sqlite3"));
    let staging = directory.join(format!("{slot}.sqlite3.tmp"));

    // VACUUM INTO refuses to overwrite, so clear a stale staging file from a
    // previously interrupted export.
    match tokio::fs::remove_file(&staging).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AppError::internal(format!(
                "cannot clear stale snapshot staging file: {e}"
            )));
        }
    }

    repository.snapshot_to(&staging).await?;

    // SQLite no-ops VACUUM INTO for some source databases (e.g. in-memory
    // ones) without reporting an error; refuse to continue on a copy that
    // was never written.
    match tokio::fs::try_exists(&staging).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(AppError::internal(
                "snapshot copy was not written; is the store file-backed?",
            ));
        }
        Err(e) => {
            return Err(AppError::internal(format!(
                "cannot verify snapshot staging file: {e}"
            )));
        }
    }

    tokio::fs::rename(&staging, &destination)
        .await
        .map_err(|e| AppError::internal(format!("cannot move snapshot into place: {e}")))?;

    tracing::info!(path = %destination.display(), "snapshot written");
    Ok(())
}
