//! Periodic housekeeping: expire overdue pending assessments and drop
//! drafts left behind by long-expired ones.

use jiff::{SignedDuration, Timestamp};
use tracing::info;

use riskform_storage::Store;

use crate::config::ServiceConfig;
use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub assessments_expired: usize,
    pub drafts_deleted: usize,
    pub dry_run: bool,
}

/// Run the sweep. With `dry_run` nothing is written; the report carries the
/// counts that a real run would have acted on.
pub fn run_cleanup(
    store: &Store,
    config: &ServiceConfig,
    dry_run: bool,
    now: Timestamp,
) -> Result<CleanupReport, ServiceError> {
    let draft_cutoff = now - SignedDuration::from_hours(24 * config.draft_retention_days);

    let report = if dry_run {
        CleanupReport {
            assessments_expired: store.count_overdue_pending(now)? as usize,
            drafts_deleted: store.count_stale_drafts(draft_cutoff)? as usize,
            dry_run: true,
        }
    } else {
        let assessments_expired = store.sweep_expired(now)?;
        let drafts_deleted = store.delete_stale_drafts(draft_cutoff)?;
        CleanupReport {
            assessments_expired,
            drafts_deleted,
            dry_run: false,
        }
    };

    info!(
        expired = report.assessments_expired,
        drafts = report.drafts_deleted,
        dry_run = report.dry_run,
        "cleanup sweep finished"
    );
    Ok(report)
}
