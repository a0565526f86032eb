//! Usage: SQLite schema migrations (user_version + incremental upgrades).

mod v0_to_v1;

use rusqlite::Connection;

pub(crate) const LATEST_SCHEMA_VERSION: i64 = 1;

pub(super) fn apply_migrations(conn: &mut Connection) -> Result<(), String> {
    let mut user_version = read_user_version(conn)?;

    if !(0..=LATEST_SCHEMA_VERSION).contains(&user_version) {
        return Err(format!(
            "unsupported sqlite schema version: user_version={user_version} (expected 0..={LATEST_SCHEMA_VERSION})"
        ));
    }

    while user_version < LATEST_SCHEMA_VERSION {
        match user_version {
            0 => v0_to_v1::migrate_v0_to_v1(conn)?,
            v => {
                return Err(format!(
                    "unsupported sqlite schema version: user_version={v} (expected 0..={LATEST_SCHEMA_VERSION})"
                ))
            }
        }
        user_version = read_user_version(conn)?;
        tracing::debug!(user_version, "sqlite schema upgraded");
    }

    Ok(())
}

pub(super) fn read_user_version(conn: &Connection) -> Result<i64, String> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| format!("failed to read sqlite user_version: {e}"))
}

fn set_user_version(tx: &rusqlite::Transaction<'_>, version: i64) -> Result<(), String> {
    tx.pragma_update(None, "user_version", version)
        .map_err(|e| format!("failed to update sqlite user_version: {e}"))?;
    Ok(())
}

fn record_migration(tx: &rusqlite::Transaction<'_>, version: i64) -> Result<(), String> {
    let applied_at = crate::shared::time::now_unix_seconds();
    tx.execute(
        "INSERT OR IGNORE INTO schema_migrations(version, applied_at) VALUES (?1, ?2)",
        (version, applied_at),
    )
    .map_err(|e| format!("failed to record migration: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .expect("prepare");
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .expect("query");
        let names: Vec<String> = rows.map(|row| row.expect("row")).collect();
        names
    }

    #[test]
    fn apply_migrations_creates_all_tables_and_is_idempotent() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");

        apply_migrations(&mut conn).expect("first apply");
        apply_migrations(&mut conn).expect("second apply");

        assert_eq!(read_user_version(&conn).expect("version"), LATEST_SCHEMA_VERSION);
        let tables = table_names(&conn);
        for expected in ["accounts", "api_keys", "schema_migrations", "settings"] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }

        let recorded: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .expect("count schema_migrations");
        assert_eq!(recorded, LATEST_SCHEMA_VERSION);
    }

    #[test]
    fn apply_migrations_rejects_newer_schema() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");
        conn.pragma_update(None, "user_version", LATEST_SCHEMA_VERSION + 1)
            .expect("set user_version");

        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(err.contains("unsupported sqlite schema version"), "{err}");
    }

    #[test]
    fn reapply_on_current_schema_keeps_existing_rows() {
        let mut conn = Connection::open_in_memory().expect("open in-memory sqlite");
        v0_to_v1::migrate_v0_to_v1(&mut conn).expect("migrate v0->v1");
        conn.execute(
            "INSERT INTO api_keys(key) VALUES (?1)",
            ["sk-existing"],
        )
        .expect("insert key");

        apply_migrations(&mut conn).expect("reapply");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM api_keys", [], |row| row.get(0))
            .expect("count api_keys");
        assert_eq!(count, 1);
    }
}
