//! Reads and writes for the live questionnaire configuration and the
//! respondent registry. The snapshot builder consumes `load_live_config`;
//! everything else is the admin-side upkeep surface.

use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use riskform_core::models::{
    OptionType, Question, QuestionGroup, QuestionOption, QuestionnaireType, Respondent,
    RespondentKind,
};

use crate::error::StorageError;
use crate::store::{fmt_timestamp, parse_timestamp, parse_uuid, Store};

/// Everything the snapshot builder needs, read in one go. Rows come back in
/// insertion order so stable sorts on display_order keep original ties.
#[derive(Debug, Clone, Default)]
pub struct LiveConfig {
    pub types: Vec<QuestionnaireType>,
    pub groups: Vec<QuestionGroup>,
    pub questions: Vec<Question>,
    pub options: Vec<QuestionOption>,
}

impl Store {
    pub fn insert_respondent(&self, respondent: &Respondent) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO respondents (id, kind, name, registration_no, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                respondent.id.to_string(),
                respondent.kind.as_str(),
                respondent.name,
                respondent.registration_no,
                fmt_timestamp(respondent.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_respondent(&self, id: Uuid) -> Result<Option<Respondent>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, kind, name, registration_no, created_at FROM respondents WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        Ok(Some(Respondent {
            id: parse_uuid(&row.get::<_, String>(0)?)?,
            kind: RespondentKind::parse(&row.get::<_, String>(1)?)
                .map_err(StorageError::Core)?,
            name: row.get(2)?,
            registration_no: row.get(3)?,
            created_at: parse_timestamp(&row.get::<_, String>(4)?)?,
        }))
    }

    pub fn insert_type(&self, qtype: &QuestionnaireType) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO questionnaire_types
                 (id, name, threshold_high, threshold_medium, weight, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                qtype.id.to_string(),
                qtype.name,
                qtype.threshold_high,
                qtype.threshold_medium,
                qtype.weight,
                qtype.is_active,
            ],
        )?;
        Ok(())
    }

    pub fn insert_group(&self, group: &QuestionGroup) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO question_groups (id, type_id, name, display_order, weight, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                group.id.to_string(),
                group.type_id.to_string(),
                group.name,
                group.display_order,
                group.weight,
                group.is_active,
            ],
        )?;
        Ok(())
    }

    pub fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO questions (id, group_id, text, display_order, weight, is_critical, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                question.id.to_string(),
                question.group_id.to_string(),
                question.text,
                question.display_order,
                question.weight,
                question.is_critical,
                question.is_active,
            ],
        )?;
        Ok(())
    }

    pub fn insert_option(&self, option: &QuestionOption) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO question_options
                 (id, question_id, option_type, score, require_comment, require_image,
                  comment_min_len, max_images, image_max_mb)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                option.id.to_string(),
                option.question_id.to_string(),
                option.option_type.as_str(),
                option.score,
                option.require_comment,
                option.require_image,
                option.comment_min_len,
                option.max_images,
                option.image_max_mb,
            ],
        )?;
        Ok(())
    }

    /// Soft-deactivate or reactivate a type. Existing snapshots are
    /// unaffected; only future builds see the change.
    pub fn set_type_active(&self, id: Uuid, is_active: bool) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "UPDATE questionnaire_types SET is_active = ?2 WHERE id = ?1",
            params![id.to_string(), is_active],
        )?;
        Ok(())
    }

    pub fn set_group_active(&self, id: Uuid, is_active: bool) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "UPDATE question_groups SET is_active = ?2 WHERE id = ?1",
            params![id.to_string(), is_active],
        )?;
        Ok(())
    }

    pub fn set_question_active(&self, id: Uuid, is_active: bool) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "UPDATE questions SET is_active = ?2 WHERE id = ?1",
            params![id.to_string(), is_active],
        )?;
        Ok(())
    }

    /// Load the live configuration slice covering the requested types:
    /// the type rows themselves plus every group, question, and option
    /// hanging off them, regardless of active flags — filtering is the
    /// snapshot builder's job.
    pub fn load_live_config(&self, type_ids: &[Uuid]) -> Result<LiveConfig, StorageError> {
        let conn = self.lock();
        let id_strings: Vec<String> = type_ids.iter().map(Uuid::to_string).collect();
        let placeholders = vec!["?"; id_strings.len()].join(", ");

        let mut cfg = LiveConfig::default();

        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, threshold_high, threshold_medium, weight, is_active
             FROM questionnaire_types WHERE id IN ({placeholders})"
        ))?;
        let mut rows = stmt.query(rusqlite::params_from_iter(&id_strings))?;
        while let Some(row) = rows.next()? {
            cfg.types.push(QuestionnaireType {
                id: parse_uuid(&row.get::<_, String>(0)?)?,
                name: row.get(1)?,
                threshold_high: row.get(2)?,
                threshold_medium: row.get(3)?,
                weight: row.get(4)?,
                is_active: row.get(5)?,
            });
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT id, type_id, name, display_order, weight, is_active
             FROM question_groups WHERE type_id IN ({placeholders}) ORDER BY rowid"
        ))?;
        let mut rows = stmt.query(rusqlite::params_from_iter(&id_strings))?;
        while let Some(row) = rows.next()? {
            cfg.groups.push(QuestionGroup {
                id: parse_uuid(&row.get::<_, String>(0)?)?,
                type_id: parse_uuid(&row.get::<_, String>(1)?)?,
                name: row.get(2)?,
                display_order: row.get(3)?,
                weight: row.get(4)?,
                is_active: row.get(5)?,
            });
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT q.id, q.group_id, q.text, q.display_order, q.weight, q.is_critical, q.is_active
             FROM questions q
             JOIN question_groups g ON q.group_id = g.id
             WHERE g.type_id IN ({placeholders}) ORDER BY q.rowid"
        ))?;
        let mut rows = stmt.query(rusqlite::params_from_iter(&id_strings))?;
        while let Some(row) = rows.next()? {
            cfg.questions.push(Question {
                id: parse_uuid(&row.get::<_, String>(0)?)?,
                group_id: parse_uuid(&row.get::<_, String>(1)?)?,
                text: row.get(2)?,
                display_order: row.get(3)?,
                weight: row.get(4)?,
                is_critical: row.get(5)?,
                is_active: row.get(6)?,
            });
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT o.id, o.question_id, o.option_type, o.score, o.require_comment,
                    o.require_image, o.comment_min_len, o.max_images, o.image_max_mb
             FROM question_options o
             JOIN questions q ON o.question_id = q.id
             JOIN question_groups g ON q.group_id = g.id
             WHERE g.type_id IN ({placeholders})"
        ))?;
        let mut rows = stmt.query(rusqlite::params_from_iter(&id_strings))?;
        while let Some(row) = rows.next()? {
            cfg.options.push(QuestionOption {
                id: parse_uuid(&row.get::<_, String>(0)?)?,
                question_id: parse_uuid(&row.get::<_, String>(1)?)?,
                option_type: OptionType::parse(&row.get::<_, String>(2)?)
                    .map_err(StorageError::Core)?,
                score: row.get(3)?,
                require_comment: row.get(4)?,
                require_image: row.get(5)?,
                comment_min_len: row.get(6)?,
                max_images: row.get(7)?,
                image_max_mb: row.get(8)?,
            });
        }

        debug!(
            types = cfg.types.len(),
            groups = cfg.groups.len(),
            questions = cfg.questions.len(),
            "loaded live config"
        );
        Ok(cfg)
    }
}
