//! # ChatRS Statement Storage
//!
//! File: cli/src/bot/storage.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The bot's knowledge is a flat list of *statements*. Each statement is a line
//! of text, optionally linked to the text it was said in response to. Training
//! and conversation both append statements; response selection reads them back.
//!
//! ## Architecture
//!
//! - `StatementStore`: the trait the bot engine programs against.
//! - `SqlStorage`: the SQLite implementation (via `rusqlite`).
//! - `StorageLocation`: parsed form of the configured storage target.
//!
//! Storage targets accept three forms:
//! - `sqlite:///relative/or/absolute.db` (`sqlite:////abs.db` for an absolute path)
//! - `sqlite://` or `sqlite://:memory:` for a throwaway in-memory database
//! - a bare filesystem path
//!
//! Lookups by `in_response_to` compare on a case-folded, trimmed copy of the text
//! (`search_in_response_to`) so "Hello" and "hello " find the same responses.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::config::SQLITE_URI_PREFIX;
use crate::core::error::BotResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tracing::{debug, info};

/// A stored line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub id: i64,
    pub text: String,
    pub in_response_to: Option<String>,
    /// Where the statement came from (`training:<corpus>` or a session id).
    pub conversation: String,
    pub created_at: DateTime<Utc>,
}

/// A statement about to be stored.
#[derive(Debug, Clone, Copy)]
pub struct NewStatement<'a> {
    pub text: &'a str,
    pub in_response_to: Option<&'a str>,
    pub conversation: &'a str,
}

/// Persistence operations the bot engine needs.
pub trait StatementStore {
    /// Stores one statement and returns its id.
    fn create(&mut self, statement: NewStatement<'_>) -> BotResult<i64>;

    /// Stores a batch of statements atomically.
    fn create_many(&mut self, statements: &[NewStatement<'_>]) -> BotResult<usize>;

    /// Number of statements stored.
    fn count(&self) -> BotResult<usize>;

    /// Statements recorded as responses to `text`, oldest first.
    fn responses_to(&self, text: &str) -> BotResult<Vec<Statement>>;

    /// Distinct texts that have at least one recorded response, oldest first.
    fn candidates(&self) -> BotResult<Vec<String>>;
}

/// Where a SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Memory,
    File(PathBuf),
}

impl StorageLocation {
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        match target.strip_prefix(SQLITE_URI_PREFIX) {
            Some("") | Some(":memory:") | Some("/:memory:") => StorageLocation::Memory,
            // sqlite:///relative.db and sqlite:////absolute.db
            Some(rest) => StorageLocation::File(PathBuf::from(
                rest.strip_prefix('/').unwrap_or(rest),
            )),
            None if target == ":memory:" => StorageLocation::Memory,
            None => StorageLocation::File(PathBuf::from(target)),
        }
    }
}

/// SQLite-backed `StatementStore`.
pub struct SqlStorage {
    conn: Connection,
}

impl SqlStorage {
    /// Opens (creating if needed) the database described by `target`.
    pub fn open(target: &str) -> BotResult<Self> {
        let location = StorageLocation::parse(target);
        let conn = match &location {
            StorageLocation::Memory => Connection::open_in_memory()?,
            StorageLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    ensure_dir_exists(parent)?;
                }
                Connection::open(path)?
            }
        };
        Self::init_schema(&conn)?;
        info!("Opened statement storage at {:?}", location);
        Ok(Self { conn })
    }

    /// Convenience constructor for a throwaway database.
    #[cfg(test)]
    pub fn in_memory() -> BotResult<Self> {
        Self::open(SQLITE_URI_PREFIX)
    }

    fn init_schema(conn: &Connection) -> BotResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS statement (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                in_response_to TEXT,
                search_in_response_to TEXT,
                conversation TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_statement_search_in_response_to
                ON statement(search_in_response_to);
            "#,
        )?;
        Ok(())
    }

    fn insert(conn: &Connection, statement: &NewStatement<'_>) -> BotResult<i64> {
        conn.execute(
            "INSERT INTO statement (text, in_response_to, search_in_response_to, conversation, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                statement.text,
                statement.in_response_to,
                statement.in_response_to.map(search_key),
                statement.conversation,
                Utc::now(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

impl StatementStore for SqlStorage {
    fn create(&mut self, statement: NewStatement<'_>) -> BotResult<i64> {
        let id = Self::insert(&self.conn, &statement)?;
        debug!("Stored statement {} ({:?})", id, statement.text);
        Ok(id)
    }

    fn create_many(&mut self, statements: &[NewStatement<'_>]) -> BotResult<usize> {
        let tx = self.conn.transaction()?;
        for statement in statements {
            Self::insert(&tx, statement)?;
        }
        tx.commit()?;
        debug!("Stored {} statements in one batch", statements.len());
        Ok(statements.len())
    }

    fn count(&self) -> BotResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM statement", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn responses_to(&self, text: &str) -> BotResult<Vec<Statement>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, in_response_to, conversation, created_at
             FROM statement
             WHERE search_in_response_to = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![search_key(text)], |row| {
            Ok(Statement {
                id: row.get(0)?,
                text: row.get(1)?,
                in_response_to: row.get(2)?,
                conversation: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn candidates(&self) -> BotResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT in_response_to, MIN(id) AS first_id
             FROM statement
             WHERE search_in_response_to IS NOT NULL
             GROUP BY search_in_response_to
             ORDER BY first_id",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// Normalized text used for `in_response_to` lookups.
fn search_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stmt<'a>(text: &'a str, in_response_to: Option<&'a str>) -> NewStatement<'a> {
        NewStatement {
            text,
            in_response_to,
            conversation: "test",
        }
    }

    #[test]
    fn test_parse_storage_location() {
        assert_eq!(StorageLocation::parse("sqlite://"), StorageLocation::Memory);
        assert_eq!(
            StorageLocation::parse("sqlite://:memory:"),
            StorageLocation::Memory
        );
        assert_eq!(
            StorageLocation::parse("sqlite:///database.sqlite3"),
            StorageLocation::File(PathBuf::from("database.sqlite3"))
        );
        assert_eq!(
            StorageLocation::parse("sqlite:////var/lib/bot.db"),
            StorageLocation::File(PathBuf::from("/var/lib/bot.db"))
        );
        assert_eq!(
            StorageLocation::parse("data/bot.db"),
            StorageLocation::File(PathBuf::from("data/bot.db"))
        );
    }

    #[test]
    fn test_responses_to_is_case_insensitive() {
        let mut storage = SqlStorage::in_memory().unwrap();
        storage.create(stmt("Hello", None)).unwrap();
        storage.create(stmt("Hi there!", Some("Hello"))).unwrap();
        storage.create(stmt("Howdy.", Some("hello "))).unwrap();

        let responses = storage.responses_to("HELLO").unwrap();
        let texts: Vec<_> = responses.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hi there!", "Howdy."]);
        assert_eq!(responses[0].in_response_to.as_deref(), Some("Hello"));
        assert_eq!(responses[0].conversation, "test");
    }

    #[test]
    fn test_candidates_are_distinct_and_ordered() {
        let mut storage = SqlStorage::in_memory().unwrap();
        storage
            .create_many(&[
                stmt("Good morning", None),
                stmt("Morning!", Some("Good morning")),
                stmt("How are you?", Some("Morning!")),
                stmt("Top of the morning", Some("good morning")),
            ])
            .unwrap();

        assert_eq!(storage.count().unwrap(), 4);
        assert_eq!(
            storage.candidates().unwrap(),
            vec!["Good morning".to_string(), "Morning!".to_string()]
        );
    }

    #[test]
    fn test_file_storage_persists_and_creates_parent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested/dir/bot.sqlite3");
        let target = format!("sqlite:///{}", db_path.display());

        {
            let mut storage = SqlStorage::open(&target).unwrap();
            storage.create(stmt("Ping", None)).unwrap();
            storage.create(stmt("Pong", Some("Ping"))).unwrap();
        }
        assert!(db_path.is_file());

        let reopened = SqlStorage::open(&target).unwrap();
        assert_eq!(reopened.count().unwrap(), 2);
        assert_eq!(reopened.responses_to("ping").unwrap()[0].text, "Pong");
    }
}
