//! Assessment rows, the transactional submission write path, and reads for
//! the results assembler.

use jiff::Timestamp;
use rusqlite::{params, Row};
use tracing::{debug, info};
use uuid::Uuid;

use riskform_core::models::{
    Answer, Assessment, AssessmentScore, AssessmentStatus, OptionType, RiskRating, ScoreLevel,
    Snapshot, SubmissionContact,
};

use crate::error::StorageError;
use crate::store::{
    fmt_timestamp, parse_timestamp, parse_timestamp_opt, parse_uuid, parse_uuid_list,
    uuid_list_json, Store,
};

/// Filters for the admin listing. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct AssessmentFilter {
    pub respondent_id: Option<Uuid>,
    pub status: Option<AssessmentStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const ASSESSMENT_COLUMNS: &str = "id, respondent_id, token_hash, selected_type_ids, \
     questions_snapshot, expires_at, status, completed_at, created_at";

fn row_to_assessment(row: &Row<'_>) -> Result<Assessment, StorageError> {
    let snapshot: Snapshot = serde_json::from_str(&row.get::<_, String>(4)?)?;
    Ok(Assessment {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        respondent_id: parse_uuid(&row.get::<_, String>(1)?)?,
        token_hash: row.get(2)?,
        selected_type_ids: parse_uuid_list(&row.get::<_, String>(3)?)?,
        questions_snapshot: snapshot,
        expires_at: parse_timestamp(&row.get::<_, String>(5)?)?,
        status: AssessmentStatus::parse(&row.get::<_, String>(6)?)
            .map_err(StorageError::Core)?,
        completed_at: parse_timestamp_opt(row.get(7)?)?,
        created_at: parse_timestamp(&row.get::<_, String>(8)?)?,
    })
}

impl Store {
    pub fn insert_assessment(&self, assessment: &Assessment) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO assessments
                 (id, respondent_id, token_hash, selected_type_ids, questions_snapshot,
                  expires_at, status, completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                assessment.id.to_string(),
                assessment.respondent_id.to_string(),
                assessment.token_hash,
                uuid_list_json(&assessment.selected_type_ids)?,
                serde_json::to_string(&assessment.questions_snapshot)?,
                fmt_timestamp(assessment.expires_at),
                assessment.status.as_str(),
                assessment.completed_at.map(fmt_timestamp),
                fmt_timestamp(assessment.created_at),
            ],
        )?;
        debug!(assessment_id = %assessment.id, "assessment stored");
        Ok(())
    }

    pub fn get_assessment(&self, id: Uuid) -> Result<Assessment, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE id = ?1"
        ))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        match rows.next()? {
            Some(row) => row_to_assessment(row),
            None => Err(StorageError::AssessmentNotFound(id)),
        }
    }

    pub fn get_assessment_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Assessment>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE token_hash = ?1"
        ))?;
        let mut rows = stmt.query(params![token_hash])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_assessment(row)?)),
            None => Ok(None),
        }
    }

    pub fn list_assessments(
        &self,
        filter: &AssessmentFilter,
    ) -> Result<Vec<Assessment>, StorageError> {
        let conn = self.lock();
        let mut sql = format!("SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE 1=1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(respondent_id) = filter.respondent_id {
            sql.push_str(" AND respondent_id = ?");
            args.push(Box::new(respondent_id.to_string()));
        }
        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            args.push(Box::new(status.as_str().to_owned()));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            args.push(Box::new(limit));
            if let Some(offset) = filter.offset {
                sql.push_str(" OFFSET ?");
                args.push(Box::new(offset));
            }
        }

        let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(refs.as_slice())?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(row_to_assessment(row)?);
        }
        Ok(out)
    }

    pub fn count_assessments(&self, filter: &AssessmentFilter) -> Result<i64, StorageError> {
        let conn = self.lock();
        let mut sql = String::from("SELECT COUNT(*) FROM assessments WHERE 1=1");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(respondent_id) = filter.respondent_id {
            sql.push_str(" AND respondent_id = ?");
            args.push(Box::new(respondent_id.to_string()));
        }
        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            args.push(Box::new(status.as_str().to_owned()));
        }
        let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        let count = conn.query_row(&sql, refs.as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Flip a single assessment to EXPIRED, but only if it is still PENDING.
    /// Returns whether a row changed. Used by the lazy-expiry read path.
    pub fn mark_expired_if_pending(&self, id: Uuid) -> Result<bool, StorageError> {
        let conn = self.lock();
        let changed = conn.execute(
            "UPDATE assessments SET status = 'EXPIRED' WHERE id = ?1 AND status = 'PENDING'",
            params![id.to_string()],
        )?;
        if changed > 0 {
            info!(assessment_id = %id, "assessment expired");
        }
        Ok(changed > 0)
    }

    /// How many PENDING assessments are past their deadline. The dry-run
    /// half of the expiry sweep.
    pub fn count_overdue_pending(&self, now: Timestamp) -> Result<i64, StorageError> {
        let conn = self.lock();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM assessments
             WHERE status = 'PENDING' AND expires_at <= ?1",
            params![fmt_timestamp(now)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Batch counterpart of lazy expiry: expire every PENDING assessment
    /// whose deadline has passed. Returns the number of rows flipped.
    pub fn sweep_expired(&self, now: Timestamp) -> Result<usize, StorageError> {
        let conn = self.lock();
        let changed = conn.execute(
            "UPDATE assessments SET status = 'EXPIRED'
             WHERE status = 'PENDING' AND expires_at <= ?1",
            params![fmt_timestamp(now)],
        )?;
        if changed > 0 {
            info!(count = changed, "expired overdue assessments");
        }
        Ok(changed)
    }

    /// The submission write path. Inside one transaction: insert every
    /// answer and score row, the optional contact, then flip the status
    /// with an optimistic `AND status = 'PENDING'` guard. If the guard
    /// matches no row a concurrent submit won the race; everything rolls
    /// back and `NotPending` is returned.
    pub fn record_submission(
        &self,
        assessment_id: Uuid,
        answers: &[Answer],
        scores: &[AssessmentScore],
        contact: Option<&SubmissionContact>,
        completed_at: Timestamp,
    ) -> Result<(), StorageError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        for answer in answers {
            tx.execute(
                "INSERT INTO answers
                     (id, assessment_id, question_id, selected_option, comment,
                      score_awarded, attachment_ids, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    answer.id.to_string(),
                    assessment_id.to_string(),
                    answer.question_id.to_string(),
                    answer.selected_option.as_str(),
                    answer.comment,
                    answer.score_awarded,
                    serde_json::to_string(&answer.attachment_ids)?,
                    fmt_timestamp(answer.created_at),
                ],
            )?;
        }

        for score in scores {
            tx.execute(
                "INSERT INTO assessment_scores
                     (assessment_id, type_id, group_id, raw_score, max_score,
                      percentage, risk_rating)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    assessment_id.to_string(),
                    score.level.type_id().map(|id| id.to_string()),
                    score.level.group_id().map(|id| id.to_string()),
                    score.raw_score,
                    score.max_score,
                    score.percentage,
                    score.risk_rating.as_str(),
                ],
            )?;
        }

        if let Some(contact) = contact {
            tx.execute(
                "INSERT INTO submission_contacts
                     (assessment_id, last_name, first_name, email, phone, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    assessment_id.to_string(),
                    contact.last_name,
                    contact.first_name,
                    contact.email,
                    contact.phone,
                    contact.position,
                ],
            )?;
        }

        let flipped = tx.execute(
            "UPDATE assessments SET status = 'COMPLETED', completed_at = ?2
             WHERE id = ?1 AND status = 'PENDING'",
            params![assessment_id.to_string(), fmt_timestamp(completed_at)],
        )?;
        if flipped == 0 {
            tx.rollback()?;
            return Err(StorageError::NotPending(assessment_id));
        }

        tx.commit()?;
        info!(
            assessment_id = %assessment_id,
            answers = answers.len(),
            scores = scores.len(),
            "submission recorded"
        );
        Ok(())
    }

    pub fn fetch_answers(&self, assessment_id: Uuid) -> Result<Vec<Answer>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, question_id, selected_option, comment, score_awarded,
                    attachment_ids, created_at
             FROM answers WHERE assessment_id = ?1 ORDER BY rowid",
        )?;
        let mut rows = stmt.query(params![assessment_id.to_string()])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(Answer {
                id: parse_uuid(&row.get::<_, String>(0)?)?,
                assessment_id,
                question_id: parse_uuid(&row.get::<_, String>(1)?)?,
                selected_option: OptionType::parse(&row.get::<_, String>(2)?)
                    .map_err(StorageError::Core)?,
                comment: row.get(3)?,
                score_awarded: row.get(4)?,
                attachment_ids: serde_json::from_str(&row.get::<_, String>(5)?)?,
                created_at: parse_timestamp(&row.get::<_, String>(6)?)?,
            });
        }
        Ok(out)
    }

    pub fn fetch_scores(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<AssessmentScore>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT type_id, group_id, raw_score, max_score, percentage, risk_rating
             FROM assessment_scores WHERE assessment_id = ?1 ORDER BY rowid",
        )?;
        let mut rows = stmt.query(params![assessment_id.to_string()])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let type_id = row
                .get::<_, Option<String>>(0)?
                .as_deref()
                .map(parse_uuid)
                .transpose()?;
            let group_id = row
                .get::<_, Option<String>>(1)?
                .as_deref()
                .map(parse_uuid)
                .transpose()?;
            out.push(AssessmentScore {
                assessment_id,
                level: ScoreLevel::from_ids(type_id, group_id),
                raw_score: row.get(2)?,
                max_score: row.get(3)?,
                percentage: row.get(4)?,
                risk_rating: RiskRating::parse(&row.get::<_, String>(5)?)
                    .map_err(StorageError::Core)?,
            });
        }
        Ok(out)
    }

    pub fn fetch_contact(
        &self,
        assessment_id: Uuid,
    ) -> Result<Option<SubmissionContact>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT last_name, first_name, email, phone, position
             FROM submission_contacts WHERE assessment_id = ?1",
        )?;
        let mut rows = stmt.query(params![assessment_id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(SubmissionContact {
                last_name: row.get(0)?,
                first_name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                position: row.get(4)?,
            })),
            None => Ok(None),
        }
    }
}
