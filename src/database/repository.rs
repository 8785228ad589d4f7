/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for the flashcard deck, abstracting
 * away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::FlashcardRecord;

/// Repository for flashcard operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Insert a flashcard and return it with its assigned id
    pub async fn insert(&self, record: &FlashcardRecord) -> Result<FlashcardRecord> {
        let mut record = record.clone();
        // Second copy for the blocking closure; the outer one is returned
        let row = record.clone();

        let id = self
            .db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO flashcards (
                        source_text, target_text, kana, romaji,
                        image_path, image_provider, translation_provider, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        row.source_text,
                        row.target_text,
                        row.kana,
                        row.romaji,
                        row.image_path,
                        row.image_provider,
                        row.translation_provider,
                        row.created_at,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!("Inserted flashcard #{}", id);
        record.id = Some(id);
        Ok(record)
    }

    /// Get a flashcard by id
    pub async fn get(&self, id: i64) -> Result<Option<FlashcardRecord>> {
        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        &format!("{} WHERE id = ?1", SELECT_CARD),
                        [id],
                        Self::map_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// Find the most recent card for a source word, case-insensitively.
    ///
    /// Case folding is ASCII-only on both sides: SQLite's LOWER() ignores
    /// non-ASCII letters, so the needle must match that behavior exactly.
    pub async fn find_by_source(&self, source_text: &str) -> Result<Option<FlashcardRecord>> {
        let needle = source_text.trim().to_ascii_lowercase();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        &format!(
                            "{} WHERE LOWER(source_text) = ?1 ORDER BY id DESC LIMIT 1",
                            SELECT_CARD
                        ),
                        [needle],
                        Self::map_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// List the most recently created cards, newest first
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<FlashcardRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{} ORDER BY created_at DESC, id DESC LIMIT ?1",
                    SELECT_CARD
                ))?;
                let cards = stmt
                    .query_map([limit], Self::map_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(cards)
            })
            .await
    }

    /// Number of stored cards
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    /// Map a flashcard row (column order of `SELECT_CARD`)
    fn map_row(row: &rusqlite::Row<'_>) -> std::result::Result<FlashcardRecord, rusqlite::Error> {
        Ok(FlashcardRecord {
            id: row.get(0)?,
            source_text: row.get(1)?,
            target_text: row.get(2)?,
            kana: row.get(3)?,
            romaji: row.get(4)?,
            image_path: row.get(5)?,
            image_provider: row.get(6)?,
            translation_provider: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

/// Shared SELECT column list for flashcard queries
const SELECT_CARD: &str = r#"
    SELECT id, source_text, target_text, kana, romaji,
           image_path, image_provider, translation_provider, created_at
    FROM flashcards
"#;
