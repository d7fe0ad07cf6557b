use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/shop.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_product_table(&conn).await?;
    create_order_table(&conn).await?;
    create_site_settings_table(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

async fn column_exists(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
) -> anyhow::Result<bool> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    for row in rows {
        let name: String = row.try_get("", "name").unwrap_or_default();
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

async fn create_product_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if !table_exists(conn, "a001_product").await? {
        tracing::info!("Creating a001_product table");
        let create_product_table_sql = r#"
            CREATE TABLE a001_product (
                id TEXT PRIMARY KEY NOT NULL,
                code TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL,
                comment TEXT,
                price REAL NOT NULL DEFAULT 0,
                category TEXT NOT NULL DEFAULT 'other',
                image_url TEXT,
                stock_quantity INTEGER NOT NULL DEFAULT 0,
                is_available INTEGER NOT NULL DEFAULT 1,
                size TEXT,
                paper_type TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_product_table_sql.to_string(),
        ))
        .await?;
    } else {
        // size and paper_type were added after the first release; older
        // databases may not have them yet
        if !column_exists(conn, "a001_product", "size").await? {
            tracing::info!("Adding size column to a001_product");
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "ALTER TABLE a001_product ADD COLUMN size TEXT;".to_string(),
            ))
            .await?;
        }
        if !column_exists(conn, "a001_product", "paper_type").await? {
            tracing::info!("Adding paper_type column to a001_product");
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "ALTER TABLE a001_product ADD COLUMN paper_type TEXT;".to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

async fn create_order_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if table_exists(conn, "a002_order").await? {
        return Ok(());
    }
    tracing::info!("Creating a002_order table");
    let create_order_table_sql = r#"
        CREATE TABLE a002_order (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            customer_name TEXT NOT NULL,
            customer_contact TEXT NOT NULL,
            message TEXT,
            product_ref TEXT,
            product_name TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            total_price REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'pending',
            notification_sent INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_order_table_sql.to_string(),
    ))
    .await?;
    Ok(())
}

async fn create_site_settings_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if table_exists(conn, "a003_site_settings").await? {
        return Ok(());
    }
    tracing::info!("Creating a003_site_settings table");
    let create_settings_table_sql = r#"
        CREATE TABLE a003_site_settings (
            id TEXT PRIMARY KEY NOT NULL,
            artist_name TEXT NOT NULL DEFAULT '',
            tagline TEXT NOT NULL DEFAULT '',
            bio TEXT NOT NULL DEFAULT '',
            about_text TEXT,
            profile_image_url TEXT,
            logo_url TEXT,
            telegram_bot_token TEXT,
            telegram_chat_id TEXT,
            created_at TEXT,
            updated_at TEXT
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_settings_table_sql.to_string(),
    ))
    .await?;
    Ok(())
}
