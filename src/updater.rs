//! Incremental history updater.
//!
//! Probes the upstream for the next missing draw and every draw after it, in
//! strictly increasing order with no gaps, and appends everything found to
//! the store in one batch. The loop stops when the upstream signals the draw
//! does not exist yet, when a probe fails, or when the per-run bound is hit.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::UpdaterConfig;
use crate::fetcher::{DrawSource, FetchOutcome};
use crate::store::HistoryStore;

/// What one update run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Records appended to the store this run.
    pub appended: usize,
    /// True when the run stopped on a failed probe rather than a clean
    /// "not yet drawn" signal.
    pub stopped_on_error: bool,
}

impl UpdateReport {
    /// Human-readable outcome for the API response.
    pub fn message(&self) -> String {
        if self.appended > 0 {
            format!("{} appended", self.appended)
        } else {
            "already up to date".to_string()
        }
    }
}

/// Sync the store with the upstream: probe sequential draw numbers starting
/// just past the stored maximum, then append all newly found records as one
/// batch. A failed probe stops the run (skipping an index would leave a gap)
/// but anything accumulated before it is still appended; the failing index is
/// retried naturally on the next run.
pub async fn run_update<S: DrawSource>(
    store: &HistoryStore,
    source: &S,
    config: &UpdaterConfig,
) -> Result<UpdateReport> {
    let start = store.max_draw_no()? + 1;
    let mut new_records = Vec::new();
    let mut stopped_on_error = false;

    debug!("update starting at draw {}", start);

    for draw_no in start..start + config.max_draws_per_run {
        match source.fetch(draw_no).await {
            FetchOutcome::Found(record) => {
                debug!("draw {} fetched ({})", record.draw_no, record.draw_date);
                new_records.push(record);
            }
            FetchOutcome::NotYetDrawn => {
                debug!("draw {} not drawn yet, stopping", draw_no);
                break;
            }
            FetchOutcome::Failed => {
                warn!("draw {} probe failed, stopping this run", draw_no);
                stopped_on_error = true;
                break;
            }
        }
    }

    if new_records.len() as u32 == config.max_draws_per_run {
        warn!(
            "update hit the per-run bound of {} draws; next run will resume",
            config.max_draws_per_run
        );
    }

    let appended = new_records.len();
    if appended > 0 {
        store.append_all(&new_records)?;
        info!(
            "appended {} draws, history now ends at draw {}",
            appended,
            start + appended as u32 - 1
        );
    } else {
        info!("history already up to date (next draw {})", start);
    }

    Ok(UpdateReport {
        appended,
        stopped_on_error,
    })
}
