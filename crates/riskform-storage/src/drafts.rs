//! Server-side draft persistence. One draft per assessment, stored as a
//! JSON blob and overwritten on every save.

use jiff::Timestamp;
use rusqlite::params;
use tracing::{debug, info};
use uuid::Uuid;

use riskform_core::models::AssessmentDraft;

use crate::error::StorageError;
use crate::store::{fmt_timestamp, parse_timestamp, Store};

impl Store {
    pub fn upsert_draft(&self, draft: &AssessmentDraft) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO assessment_drafts (assessment_id, draft_data, last_saved_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (assessment_id)
             DO UPDATE SET draft_data = excluded.draft_data,
                           last_saved_at = excluded.last_saved_at",
            params![
                draft.assessment_id.to_string(),
                serde_json::to_string(draft)?,
                fmt_timestamp(draft.last_saved_at),
            ],
        )?;
        debug!(assessment_id = %draft.assessment_id, "draft saved");
        Ok(())
    }

    pub fn load_draft(
        &self,
        assessment_id: Uuid,
    ) -> Result<Option<AssessmentDraft>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT draft_data, last_saved_at FROM assessment_drafts WHERE assessment_id = ?1",
        )?;
        let mut rows = stmt.query(params![assessment_id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut draft: AssessmentDraft = serde_json::from_str(&row.get::<_, String>(0)?)?;
        // The column is authoritative; the blob copy may lag behind it.
        draft.last_saved_at = parse_timestamp(&row.get::<_, String>(1)?)?;
        Ok(Some(draft))
    }

    pub fn delete_draft(&self, assessment_id: Uuid) -> Result<bool, StorageError> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM assessment_drafts WHERE assessment_id = ?1",
            params![assessment_id.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Count drafts whose assessment expired before the cutoff. The dry-run
    /// half of the cleanup sweep.
    pub fn count_stale_drafts(&self, cutoff: Timestamp) -> Result<i64, StorageError> {
        let conn = self.lock();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM assessment_drafts d
             JOIN assessments a ON d.assessment_id = a.id
             WHERE a.status = 'EXPIRED' AND a.expires_at < ?1",
            params![fmt_timestamp(cutoff)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete drafts whose assessment expired before the cutoff. Returns the
    /// number of drafts removed.
    pub fn delete_stale_drafts(&self, cutoff: Timestamp) -> Result<usize, StorageError> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM assessment_drafts WHERE assessment_id IN (
                 SELECT id FROM assessments
                 WHERE status = 'EXPIRED' AND expires_at < ?1
             )",
            params![fmt_timestamp(cutoff)],
        )?;
        if deleted > 0 {
            info!(count = deleted, "stale drafts removed");
        }
        Ok(deleted)
    }
}
