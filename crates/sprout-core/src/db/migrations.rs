//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate_v1(conn)?;
    }
    if version < 2 {
        migrate_v2(conn)?;
    }

    tracing::debug!("Plant store schema at version {}", CURRENT_VERSION);
    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration to version 1: Initial schema
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS owned_plants (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            about TEXT NOT NULL DEFAULT '',
            water_tips TEXT NOT NULL DEFAULT '',
            photo TEXT NOT NULL DEFAULT '',
            environments TEXT NOT NULL DEFAULT '[]',
            notification_at INTEGER NOT NULL,
            saved_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_owned_plants_notification
            ON owned_plants(notification_at ASC);
        INSERT INTO schema_version (version) VALUES (1);
        COMMIT;",
    )?;
    Ok(())
}

/// Migration to version 2: watering frequency
fn migrate_v2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;
        ALTER TABLE owned_plants ADD COLUMN frequency TEXT;
        INSERT INTO schema_version (version) VALUES (2);
        COMMIT;",
    )?;
    Ok(())
}
