//! SQL schema for the officiating SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS certifications (
    certification_id TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    abbreviation     TEXT NOT NULL DEFAULT '',
    description      TEXT NOT NULL DEFAULT '',
    level            INTEGER NOT NULL DEFAULT 1 CHECK (level >= 0)
);

CREATE TABLE IF NOT EXISTS leagues (
    league_id    TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    founded_year INTEGER,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS divisions (
    division_id TEXT PRIMARY KEY,
    league_id   TEXT NOT NULL REFERENCES leagues(league_id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    team_id      TEXT PRIMARY KEY,
    division_id  TEXT NOT NULL REFERENCES divisions(division_id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    abbreviation TEXT NOT NULL DEFAULT '',
    mascot       TEXT NOT NULL DEFAULT '',
    address      TEXT NOT NULL DEFAULT '',
    website      TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pools (
    pool_id       TEXT PRIMARY KEY,
    team_id       TEXT NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    address       TEXT NOT NULL DEFAULT '',
    length        INTEGER NOT NULL DEFAULT 50,
    units         TEXT NOT NULL DEFAULT 'yards',   -- 'yards' | 'meters'
    lanes         INTEGER NOT NULL DEFAULT 6,
    bidirectional INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS officials (
    official_id      TEXT PRIMARY KEY,
    team_id          TEXT NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
    name             TEXT NOT NULL,
    email            TEXT NOT NULL DEFAULT '',
    phone            TEXT NOT NULL DEFAULT '',
    certification_id TEXT REFERENCES certifications(certification_id) ON DELETE SET NULL,
    active           INTEGER NOT NULL DEFAULT 1,
    proficiency      TEXT NOT NULL DEFAULT 'beginner',
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS strategies (
    strategy_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- The same role may recur across locations or strategies, never within one.
CREATE TABLE IF NOT EXISTS positions (
    position_id              TEXT PRIMARY KEY,
    strategy_id              TEXT NOT NULL REFERENCES strategies(strategy_id) ON DELETE CASCADE,
    role                     TEXT NOT NULL,
    location                 TEXT NOT NULL DEFAULT '',
    minimum_certification_id TEXT REFERENCES certifications(certification_id) ON DELETE SET NULL,
    created_at               TEXT NOT NULL,
    updated_at               TEXT NOT NULL,
    UNIQUE (role, strategy_id, location)
);

CREATE TABLE IF NOT EXISTS events (
    event_id     TEXT PRIMARY KEY,
    event_number INTEGER NOT NULL CHECK (event_number BETWEEN 1 AND 99),
    name         TEXT NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    meet_type    TEXT NOT NULL DEFAULT 'dual',
    gender       TEXT NOT NULL DEFAULT 'male',
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL,
    UNIQUE (event_number, meet_type)
);

-- At most one row per (event, position); written by auto-assignment or by hand.
CREATE TABLE IF NOT EXISTS event_positions (
    event_position_id TEXT PRIMARY KEY,
    event_id          TEXT NOT NULL REFERENCES events(event_id) ON DELETE CASCADE,
    position_id       TEXT NOT NULL REFERENCES positions(position_id) ON DELETE CASCADE,
    is_mandatory      INTEGER NOT NULL DEFAULT 1,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    UNIQUE (event_id, position_id)
);

CREATE TABLE IF NOT EXISTS meets (
    meet_id      TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    date         TEXT NOT NULL,                    -- YYYY-MM-DD
    league_id    TEXT NOT NULL REFERENCES leagues(league_id) ON DELETE CASCADE,
    host_team_id TEXT NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
    pool_id      TEXT REFERENCES pools(pool_id) ON DELETE SET NULL,
    meet_type    TEXT NOT NULL DEFAULT 'dual',
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS meet_teams (
    meet_id TEXT NOT NULL REFERENCES meets(meet_id) ON DELETE CASCADE,
    team_id TEXT NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
    PRIMARY KEY (meet_id, team_id)
);

CREATE TABLE IF NOT EXISTS assignments (
    assignment_id TEXT PRIMARY KEY,
    meet_id       TEXT NOT NULL REFERENCES meets(meet_id) ON DELETE CASCADE,
    official_id   TEXT NOT NULL REFERENCES officials(official_id) ON DELETE CASCADE,
    role          TEXT NOT NULL,
    notes         TEXT NOT NULL DEFAULT '',
    confirmed     INTEGER NOT NULL DEFAULT 0,
    assigned_at   TEXT NOT NULL,
    UNIQUE (meet_id, official_id, role)
);

CREATE INDEX IF NOT EXISTS positions_strategy_idx    ON positions(strategy_id);
CREATE INDEX IF NOT EXISTS event_positions_pos_idx   ON event_positions(position_id);
CREATE INDEX IF NOT EXISTS officials_team_idx        ON officials(team_id);
CREATE INDEX IF NOT EXISTS assignments_meet_idx      ON assignments(meet_id);

PRAGMA user_version = 1;
";
