/// Full schema, applied idempotently on startup. Constraints mirror the
/// domain invariants: unique token hash, one answer per (assessment,
/// question), one score row per (assessment, type, group), raw ≤ max.
pub const DDL: &str = "
CREATE TABLE IF NOT EXISTS respondents (
    id              TEXT PRIMARY KEY,
    kind            TEXT NOT NULL,
    name            TEXT NOT NULL,
    registration_no TEXT,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS questionnaire_types (
    id               TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    threshold_high   INTEGER NOT NULL,
    threshold_medium INTEGER NOT NULL,
    weight           REAL NOT NULL,
    is_active        INTEGER NOT NULL DEFAULT 1,
    CHECK (threshold_high > threshold_medium),
    CHECK (weight > 0)
);

CREATE TABLE IF NOT EXISTS question_groups (
    id            TEXT PRIMARY KEY,
    type_id       TEXT NOT NULL REFERENCES questionnaire_types(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    display_order INTEGER NOT NULL,
    weight        REAL NOT NULL,
    is_active     INTEGER NOT NULL DEFAULT 1,
    CHECK (display_order >= 0),
    CHECK (weight > 0)
);

CREATE TABLE IF NOT EXISTS questions (
    id            TEXT PRIMARY KEY,
    group_id      TEXT NOT NULL REFERENCES question_groups(id) ON DELETE CASCADE,
    text          TEXT NOT NULL,
    display_order INTEGER NOT NULL,
    weight        REAL NOT NULL DEFAULT 1.0,
    is_critical   INTEGER NOT NULL DEFAULT 0,
    is_active     INTEGER NOT NULL DEFAULT 1,
    CHECK (display_order >= 0)
);

CREATE TABLE IF NOT EXISTS question_options (
    id              TEXT PRIMARY KEY,
    question_id     TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
    option_type     TEXT NOT NULL,
    score           INTEGER NOT NULL DEFAULT 0,
    require_comment INTEGER NOT NULL DEFAULT 0,
    require_image   INTEGER NOT NULL DEFAULT 0,
    comment_min_len INTEGER NOT NULL DEFAULT 0,
    max_images      INTEGER NOT NULL DEFAULT 3,
    image_max_mb    INTEGER NOT NULL DEFAULT 5,
    UNIQUE (question_id, option_type),
    CHECK (score >= 0),
    CHECK (comment_min_len >= 0 AND comment_min_len <= 2000),
    CHECK (max_images >= 1 AND max_images <= 10),
    CHECK (image_max_mb >= 1 AND image_max_mb <= 20)
);

CREATE TABLE IF NOT EXISTS assessments (
    id                 TEXT PRIMARY KEY,
    respondent_id      TEXT NOT NULL REFERENCES respondents(id) ON DELETE CASCADE,
    token_hash         TEXT NOT NULL UNIQUE,
    selected_type_ids  TEXT NOT NULL,
    questions_snapshot TEXT NOT NULL,
    expires_at         TEXT NOT NULL,
    status             TEXT NOT NULL DEFAULT 'PENDING',
    completed_at       TEXT,
    created_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_assessments_respondent ON assessments(respondent_id);
CREATE INDEX IF NOT EXISTS idx_assessments_status ON assessments(status);
CREATE INDEX IF NOT EXISTS idx_assessments_expires_at ON assessments(expires_at);

CREATE TABLE IF NOT EXISTS answers (
    id             TEXT PRIMARY KEY,
    assessment_id  TEXT NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
    question_id    TEXT NOT NULL,
    selected_option TEXT NOT NULL,
    comment        TEXT,
    score_awarded  INTEGER NOT NULL,
    attachment_ids TEXT NOT NULL DEFAULT '[]',
    created_at     TEXT NOT NULL,
    UNIQUE (assessment_id, question_id),
    CHECK (score_awarded >= 0)
);

CREATE TABLE IF NOT EXISTS assessment_scores (
    assessment_id TEXT NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
    type_id       TEXT,
    group_id      TEXT,
    raw_score     INTEGER NOT NULL,
    max_score     INTEGER NOT NULL,
    percentage    REAL NOT NULL,
    risk_rating   TEXT NOT NULL,
    UNIQUE (assessment_id, type_id, group_id),
    CHECK (raw_score >= 0),
    CHECK (max_score >= 0),
    CHECK (raw_score <= max_score),
    CHECK (percentage >= 0 AND percentage <= 100)
);

CREATE INDEX IF NOT EXISTS idx_scores_assessment ON assessment_scores(assessment_id);

CREATE TABLE IF NOT EXISTS submission_contacts (
    assessment_id TEXT PRIMARY KEY REFERENCES assessments(id) ON DELETE CASCADE,
    last_name     TEXT NOT NULL,
    first_name    TEXT NOT NULL,
    email         TEXT,
    phone         TEXT,
    position      TEXT
);

CREATE TABLE IF NOT EXISTS assessment_drafts (
    assessment_id TEXT PRIMARY KEY REFERENCES assessments(id) ON DELETE CASCADE,
    draft_data    TEXT NOT NULL,
    last_saved_at TEXT NOT NULL
);
";
