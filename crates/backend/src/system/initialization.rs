use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// System tables: users, refresh tokens and the key/value settings bucket
/// (JWT secret lives there). Statements are idempotent.
const SYSTEM_MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_login_at TEXT
);

CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    token_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    revoked_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash ON sys_refresh_tokens (token_hash);

CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT,
    updated_at TEXT
);
"#;

/// Apply the embedded system migration
pub async fn apply_system_migration() -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    // SQLite via sea-orm wants one statement per execute
    for (idx, statement) in SYSTEM_MIGRATION_SQL.split(';').enumerate() {
        let trimmed = statement.trim();
        if trimmed.is_empty() {
            continue;
        }
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{};", trimmed),
        ))
        .await
        .with_context(|| {
            format!(
                "Failed to execute system migration statement #{}: {}",
                idx,
                trimmed.lines().next().unwrap_or_default()
            )
        })?;
    }

    tracing::info!("System migration applied");

    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: None,
            full_name: Some("Administrator".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(admin_dto).await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin user created!");
        tracing::warn!("  Username: admin");
        tracing::warn!("  Password: admin");
        tracing::warn!("  User ID: {}", admin_id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}
