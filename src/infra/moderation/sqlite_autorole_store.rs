// SQLite-backed autorole store.
//
// Tables:
// - autoroles: emoji -> role bindings, unique per (emoji, role_id)

use crate::core::moderation::{Autorole, AutoroleError, AutoroleStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

pub struct SqliteAutoroleStore {
    pool: Pool<Sqlite>,
}

impl SqliteAutoroleStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), AutoroleError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS autoroles (
                emoji TEXT NOT NULL,
                role_id INTEGER NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                PRIMARY KEY (emoji, role_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AutoroleError::StorageError(e.to_string()))?;

        Ok(())
    }

    fn map_row(row: &SqliteRow) -> Autorole {
        let created_at: String = row.get("created_at");
        Autorole {
            emoji: row.get("emoji"),
            role_id: row.get::<i64, _>("role_id") as u64,
            description: row.get("description"),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        }
    }
}

#[async_trait]
impl AutoroleStore for SqliteAutoroleStore {
    async fn list(&self) -> Result<Vec<Autorole>, AutoroleError> {
        let rows = sqlx::query(
            "SELECT emoji, role_id, description, created_at FROM autoroles ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AutoroleError::StorageError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    async fn insert_unique(&self, autorole: Autorole) -> Result<bool, AutoroleError> {
        let result = sqlx::query(
            r#"
            INSERT INTO autoroles (emoji, role_id, description, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(emoji, role_id) DO NOTHING
            "#,
        )
        .bind(&autorole.emoji)
        .bind(autorole.role_id as i64)
        .bind(&autorole.description)
        .bind(autorole.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AutoroleError::StorageError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, emoji: &str, role_id: u64) -> Result<bool, AutoroleError> {
        let result = sqlx::query("DELETE FROM autoroles WHERE emoji = ? AND role_id = ?")
            .bind(emoji)
            .bind(role_id as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| AutoroleError::StorageError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_emoji(&self, emoji: &str) -> Result<Vec<Autorole>, AutoroleError> {
        let rows = sqlx::query(
            "SELECT emoji, role_id, description, created_at FROM autoroles WHERE emoji = ?",
        )
        .bind(emoji)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AutoroleError::StorageError(e.to_string()))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use tempfile::NamedTempFile;

    async fn open_store(path: &std::path::Path) -> SqliteAutoroleStore {
        let pool = SqlitePoolOptions::new()
            .connect(&format!("sqlite://{}?mode=rwc", path.display()))
            .await
            .unwrap();
        let store = SqliteAutoroleStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    fn autorole(emoji: &str, role_id: u64) -> Autorole {
        Autorole {
            emoji: emoji.to_string(),
            role_id,
            description: format!("role {}", role_id),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_is_unique_per_emoji_and_role() {
        let tmp = NamedTempFile::new().unwrap();
        let store = open_store(tmp.path()).await;

        assert!(store.insert_unique(autorole("🎮", 1)).await.unwrap());
        assert!(!store.insert_unique(autorole("🎮", 1)).await.unwrap());
        assert!(store.insert_unique(autorole("🎮", 2)).await.unwrap());

        let found = store.find_by_emoji("🎮").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(store.find_by_emoji("🎨").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_roundtrip() {
        let tmp = NamedTempFile::new().unwrap();
        let expected = autorole("<:party:123456>", 77);

        {
            let store = open_store(tmp.path()).await;
            store.insert_unique(expected.clone()).await.unwrap();
        }

        // Reopen from file
        let store = open_store(tmp.path()).await;
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].emoji, expected.emoji);
        assert_eq!(all[0].role_id, 77);
        assert_eq!(all[0].description, "role 77");
        assert_eq!(all[0].created_at.timestamp(), expected.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_delete() {
        let tmp = NamedTempFile::new().unwrap();
        let store = open_store(tmp.path()).await;
        store.insert_unique(autorole("🎨", 5)).await.unwrap();

        assert!(store.delete("🎨", 5).await.unwrap());
        assert!(!store.delete("🎨", 5).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
