use anyhow::{Context, Result};
use std::path::Path;

use super::connection::DbConn;

/// Create any missing tables; existing data is kept
pub fn initialize_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    execute_statements(conn, schema_sql)?;
    log::info!("Database schema ready");
    Ok(())
}

/// Delete the database file
pub fn remove_database(database_path: &str) -> Result<()> {
    let path = Path::new(database_path);
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to delete database file {}", database_path))?;
        log::info!("Deleted database file: {}", database_path);
    }
    Ok(())
}

fn execute_statements(conn: &mut DbConn, sql: &str) -> Result<()> {
    let statements = split_sql_statements(sql);

    for (idx, statement) in statements.iter().enumerate() {
        conn.execute(statement, [])
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
