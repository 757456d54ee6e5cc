//! SQLite-backed persistence gateway
//!
//! One database holds every board. Rows reference their parent with foreign
//! keys declared `ON DELETE CASCADE`, but deletes are still issued child-first
//! inside a transaction so the order never depends on the pragma being on.
//!
//! # Schema
//!
//! - `boards`: (id, name, owner_id, created_at, updated_at)
//! - `columns`: (id, board_id, name, position, created_at, updated_at)
//! - `cards`: (id, column_id, title, description, due_date, label,
//!   assignee_id, position, created_at, updated_at)
//! - `activity`: append-only operation log
//!
//! Timestamps are RFC 3339 text, due dates `YYYY-MM-DD`.

use crate::error::{KanbanError, Result};
use crate::gateway::PersistenceGateway;
use crate::reorder::{Placement, PositionUpdate, WriteSet};
use crate::types::{Board, BoardId, Card, CardId, Column, ColumnId, Label, UserId};
use async_trait::async_trait;
use cardboard_operations::LogEntry;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

const CARD_COLUMNS: &str = "id, column_id, title, description, due_date, label, assignee_id, \
                            position, created_at, updated_at";

/// SQLite database for boards, columns and cards
///
/// The connection sits behind a mutex so the gateway is `Send + Sync` and can
/// be shared across tokio tasks.
pub struct SqliteGateway {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteGateway {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let db = Self::with_connection(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "opened board database");
        Ok(db)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Self {
            conn: Mutex::new(conn),
            path,
        };
        db.create_schema()?;
        Ok(db)
    }

    /// Path of the database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_schema(&self) -> Result<()> {
        self.conn().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS boards (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS columns (
                id TEXT PRIMARY KEY,
                board_id TEXT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                position INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS cards (
                id TEXT PRIMARY KEY,
                column_id TEXT NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                due_date TEXT,
                label TEXT,
                assignee_id TEXT,
                position INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS activity (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                timestamp TEXT NOT NULL,
                op TEXT NOT NULL,
                input TEXT NOT NULL,
                output TEXT NOT NULL,
                actor TEXT,
                duration_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_boards_owner ON boards(owner_id, created_at);
            CREATE INDEX IF NOT EXISTS idx_columns_board ON columns(board_id, position);
            CREATE INDEX IF NOT EXISTS idx_cards_column ON cards(column_id, position);
            CREATE INDEX IF NOT EXISTS idx_activity_actor ON activity(actor, seq);
            "#,
        )?;
        Ok(())
    }
}

// =============================================================================
// Row conversion
// =============================================================================

fn timestamp_text(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn conversion_error(
    row: &Row<'_>,
    column: &str,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    let index = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn timestamp(row: &Row<'_>, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| conversion_error(row, column, e))
}

fn position(row: &Row<'_>) -> rusqlite::Result<usize> {
    let raw: i64 = row.get("position")?;
    usize::try_from(raw).map_err(|e| conversion_error(row, "position", e))
}

fn to_sql_position(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: BoardId::from_string(row.get::<_, String>("id")?),
        name: row.get("name")?,
        owner: UserId::from_string(row.get::<_, String>("owner_id")?),
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

fn column_from_row(row: &Row<'_>) -> rusqlite::Result<Column> {
    Ok(Column {
        id: ColumnId::from_string(row.get::<_, String>("id")?),
        name: row.get("name")?,
        board: BoardId::from_string(row.get::<_, String>("board_id")?),
        position: position(row)?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(raw) => Some(
            NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|e| conversion_error(row, "due_date", e))?,
        ),
        None => None,
    };
    let label = match row.get::<_, Option<String>>("label")? {
        Some(raw) => Some(
            raw.parse::<Label>()
                .map_err(|e| conversion_error(row, "label", e))?,
        ),
        None => None,
    };

    Ok(Card {
        id: CardId::from_string(row.get::<_, String>("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        due_date,
        column: ColumnId::from_string(row.get::<_, String>("column_id")?),
        label,
        assignee: row
            .get::<_, Option<String>>("assignee_id")?
            .map(UserId::from_string),
        position: position(row)?,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
    })
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<LogEntry> {
    let input: String = row.get("input")?;
    let output: String = row.get("output")?;
    let duration: i64 = row.get("duration_ms")?;
    Ok(LogEntry {
        id: row.get("id")?,
        timestamp: timestamp(row, "timestamp")?,
        op: row.get("op")?,
        input: serde_json::from_str(&input).map_err(|e| conversion_error(row, "input", e))?,
        output: serde_json::from_str(&output).map_err(|e| conversion_error(row, "output", e))?,
        actor: row.get("actor")?,
        duration_ms: u64::try_from(duration).unwrap_or_default(),
    })
}

// =============================================================================
// Write helpers shared by single calls and transactions
// =============================================================================

fn write_placement(conn: &Connection, placement: &Placement, now: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE cards SET column_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            placement.column.as_str(),
            to_sql_position(placement.position),
            now,
            placement.card.as_str()
        ],
    )?;
    if changed == 0 {
        return Err(KanbanError::CardNotFound {
            id: placement.card.to_string(),
        });
    }
    Ok(())
}

fn write_positions(tx: &Transaction<'_>, updates: &[PositionUpdate], now: &str) -> Result<()> {
    let mut stmt =
        tx.prepare_cached("UPDATE cards SET position = ?1, updated_at = ?2 WHERE id = ?3")?;
    for update in updates {
        let changed = stmt.execute(params![
            to_sql_position(update.position),
            now,
            update.card.as_str()
        ])?;
        if changed == 0 {
            return Err(KanbanError::CardNotFound {
                id: update.card.to_string(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn insert_board(&self, board: &Board) -> Result<()> {
        self.conn().execute(
            "INSERT INTO boards (id, name, owner_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                board.id.as_str(),
                board.name,
                board.owner.as_str(),
                timestamp_text(&board.created_at),
                timestamp_text(&board.updated_at)
            ],
        )?;
        debug!(board = %board.id, "inserted board");
        Ok(())
    }

    async fn fetch_board(&self, id: &BoardId) -> Result<Board> {
        self.conn()
            .query_row(
                "SELECT id, name, owner_id, created_at, updated_at FROM boards WHERE id = ?1",
                [id.as_str()],
                board_from_row,
            )
            .optional()?
            .ok_or_else(|| KanbanError::BoardNotFound { id: id.to_string() })
    }

    async fn list_boards(&self, owner: &UserId) -> Result<Vec<Board>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, owner_id, created_at, updated_at FROM boards
             WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([owner.as_str()], board_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM cards WHERE column_id IN (SELECT id FROM columns WHERE board_id = ?1)",
            [id.as_str()],
        )?;
        tx.execute("DELETE FROM columns WHERE board_id = ?1", [id.as_str()])?;
        let changed = tx.execute("DELETE FROM boards WHERE id = ?1", [id.as_str()])?;
        if changed == 0 {
            return Err(KanbanError::BoardNotFound { id: id.to_string() });
        }
        tx.commit()?;
        debug!(board = %id, "deleted board");
        Ok(())
    }

    async fn insert_column(&self, column: &Column) -> Result<()> {
        self.conn().execute(
            "INSERT INTO columns (id, board_id, name, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                column.id.as_str(),
                column.board.as_str(),
                column.name,
                to_sql_position(column.position),
                timestamp_text(&column.created_at),
                timestamp_text(&column.updated_at)
            ],
        )?;
        Ok(())
    }

    async fn fetch_column(&self, id: &ColumnId) -> Result<Column> {
        self.conn()
            .query_row(
                "SELECT id, board_id, name, position, created_at, updated_at
                 FROM columns WHERE id = ?1",
                [id.as_str()],
                column_from_row,
            )
            .optional()?
            .ok_or_else(|| KanbanError::ColumnNotFound { id: id.to_string() })
    }

    async fn fetch_columns(&self, board: &BoardId) -> Result<Vec<Column>> {
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(
            "SELECT id, board_id, name, position, created_at, updated_at
             FROM columns WHERE board_id = ?1 ORDER BY position, created_at, id",
        )?;
        let rows = stmt.query_map([board.as_str()], column_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn update_column(&self, column: &Column) -> Result<()> {
        let changed = self.conn().execute(
            "UPDATE columns SET name = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                column.name,
                to_sql_position(column.position),
                timestamp_text(&Utc::now()),
                column.id.as_str()
            ],
        )?;
        if changed == 0 {
            return Err(KanbanError::ColumnNotFound {
                id: column.id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_column(&self, id: &ColumnId) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let cards = tx.execute("DELETE FROM cards WHERE column_id = ?1", [id.as_str()])?;
        let changed = tx.execute("DELETE FROM columns WHERE id = ?1", [id.as_str()])?;
        if changed == 0 {
            return Err(KanbanError::ColumnNotFound { id: id.to_string() });
        }
        tx.commit()?;
        debug!(column = %id, cards, "deleted column");
        Ok(())
    }

    async fn insert_card(&self, card: &Card) -> Result<()> {
        self.conn().execute(
            "INSERT INTO cards (id, column_id, title, description, due_date, label,
                                assignee_id, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                card.id.as_str(),
                card.column.as_str(),
                card.title,
                card.description,
                card.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                card.label.map(|l| l.as_str()),
                card.assignee.as_ref().map(|a| a.as_str()),
                to_sql_position(card.position),
                timestamp_text(&card.created_at),
                timestamp_text(&card.updated_at)
            ],
        )?;
        Ok(())
    }

    async fn fetch_card(&self, id: &CardId) -> Result<Card> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS),
                [id.as_str()],
                card_from_row,
            )
            .optional()?
            .ok_or_else(|| KanbanError::CardNotFound { id: id.to_string() })
    }

    async fn fetch_cards_for_columns(&self, columns: &[ColumnId]) -> Result<Vec<Card>> {
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM cards WHERE column_id IN ({}) ORDER BY position, created_at, id",
            CARD_COLUMNS, placeholders
        );

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(columns.iter().map(|c| c.as_str())), |row| {
            card_from_row(row)
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    async fn update_card(&self, card: &Card) -> Result<()> {
        let changed = self.conn().execute(
            "UPDATE cards SET title = ?1, description = ?2, due_date = ?3, label = ?4,
                              assignee_id = ?5, column_id = ?6, position = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                card.title,
                card.description,
                card.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                card.label.map(|l| l.as_str()),
                card.assignee.as_ref().map(|a| a.as_str()),
                card.column.as_str(),
                to_sql_position(card.position),
                timestamp_text(&Utc::now()),
                card.id.as_str()
            ],
        )?;
        if changed == 0 {
            return Err(KanbanError::CardNotFound {
                id: card.id.to_string(),
            });
        }
        Ok(())
    }

    async fn update_card_placement(&self, placement: &Placement) -> Result<()> {
        write_placement(&self.conn(), placement, &timestamp_text(&Utc::now()))
    }

    async fn batch_update_positions(&self, updates: &[PositionUpdate]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        write_positions(&tx, updates, &timestamp_text(&Utc::now()))?;
        tx.commit()?;
        Ok(())
    }

    async fn delete_card(&self, id: &CardId) -> Result<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM cards WHERE id = ?1", [id.as_str()])?;
        if changed == 0 {
            return Err(KanbanError::CardNotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Placement and sibling positions land in one transaction.
    async fn apply_writes(&self, writes: &WriteSet) -> Result<()> {
        let now = timestamp_text(&Utc::now());
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        write_placement(&tx, &writes.placement, &now)?;
        write_positions(&tx, &writes.positions, &now)?;
        tx.commit()?;
        debug!(card = %writes.placement.card, rows = writes.len(), "committed write-set");
        Ok(())
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.conn().execute(
            "INSERT INTO activity (id, timestamp, op, input, output, actor, duration_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                timestamp_text(&entry.timestamp),
                entry.op,
                serde_json::to_string(&entry.input)?,
                serde_json::to_string(&entry.output)?,
                entry.actor,
                i64::try_from(entry.duration_ms).unwrap_or(i64::MAX)
            ],
        )?;
        Ok(())
    }

    async fn read_activity(
        &self,
        actor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>> {
        let limit = limit.map(to_sql_position).unwrap_or(-1);
        let conn = self.conn();
        let mut stmt = conn.prepare_cached(
            "SELECT id, timestamp, op, input, output, actor, duration_ms
             FROM activity
             WHERE ?1 IS NULL OR actor = ?1
             ORDER BY seq DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![actor, limit], activity_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn seeded() -> (SqliteGateway, Board, Vec<Column>) {
        let db = SqliteGateway::open_in_memory().unwrap();
        let board = Board::new("Release", UserId::from("alice"));
        db.insert_board(&board).await.unwrap();
        let columns = board.default_columns();
        for column in &columns {
            db.insert_column(column).await.unwrap();
        }
        (db, board, columns)
    }

    #[tokio::test]
    async fn test_board_round_trip() {
        let (db, board, _) = seeded().await;
        let fetched = db.fetch_board(&board.id).await.unwrap();
        assert_eq!(fetched.name, "Release");
        assert_eq!(fetched.owner, UserId::from("alice"));
        assert_eq!(fetched.created_at, board.created_at);
    }

    #[tokio::test]
    async fn test_missing_board_is_not_found() {
        let db = SqliteGateway::open_in_memory().unwrap();
        let err = db.fetch_board(&BoardId::from("nope")).await.unwrap_err();
        assert!(matches!(err, KanbanError::BoardNotFound { .. }));
    }

    #[tokio::test]
    async fn test_columns_come_back_ordered() {
        let (db, board, _) = seeded().await;
        let fetched = db.fetch_columns(&board.id).await.unwrap();
        let names: Vec<&str> = fetched.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["To Do", "In Progress", "Done"]);
    }

    #[tokio::test]
    async fn test_card_round_trip_with_optionals() {
        let (db, _, columns) = seeded().await;
        let due = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        let card = Card::new("Wrap gifts", columns[0].id.clone(), 0)
            .with_description("all of them")
            .with_due_date(due)
            .with_label(Label::Red)
            .with_assignee(UserId::from("bob"));
        db.insert_card(&card).await.unwrap();

        let fetched = db.fetch_card(&card.id).await.unwrap();
        assert_eq!(fetched, card);
    }

    #[tokio::test]
    async fn test_cards_for_columns_ordered_by_position() {
        let (db, _, columns) = seeded().await;
        let late = Card::new("second", columns[0].id.clone(), 1);
        let early = Card::new("first", columns[0].id.clone(), 0);
        let other = Card::new("elsewhere", columns[1].id.clone(), 0);
        db.insert_card(&late).await.unwrap();
        db.insert_card(&early).await.unwrap();
        db.insert_card(&other).await.unwrap();

        let cards = db
            .fetch_cards_for_columns(&[columns[0].id.clone()])
            .await
            .unwrap();
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);

        assert!(db.fetch_cards_for_columns(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_writes_is_atomic() {
        let (db, _, columns) = seeded().await;
        let card = Card::new("mover", columns[0].id.clone(), 0);
        db.insert_card(&card).await.unwrap();

        let writes = WriteSet {
            placement: Placement {
                card: card.id.clone(),
                column: columns[1].id.clone(),
                position: 0,
            },
            positions: vec![PositionUpdate {
                card: CardId::from("missing"),
                position: 1,
            }],
        };

        let err = db.apply_writes(&writes).await.unwrap_err();
        assert!(matches!(err, KanbanError::CardNotFound { .. }));

        // The placement rolled back with the failed sibling update
        let fetched = db.fetch_card(&card.id).await.unwrap();
        assert_eq!(fetched.column, columns[0].id);
    }

    #[tokio::test]
    async fn test_delete_column_removes_its_cards() {
        let (db, _, columns) = seeded().await;
        let card = Card::new("doomed", columns[2].id.clone(), 0);
        db.insert_card(&card).await.unwrap();

        db.delete_column(&columns[2].id).await.unwrap();

        assert!(db.fetch_card(&card.id).await.unwrap_err().is_not_found());
        assert!(db.fetch_column(&columns[2].id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_board_cascades() {
        let (db, board, columns) = seeded().await;
        let card = Card::new("doomed", columns[0].id.clone(), 0);
        db.insert_card(&card).await.unwrap();

        db.delete_board(&board.id).await.unwrap();

        assert!(db.fetch_columns(&board.id).await.unwrap().is_empty());
        assert!(db.fetch_card(&card.id).await.unwrap_err().is_not_found());
        assert!(matches!(
            db.delete_board(&board.id).await,
            Err(KanbanError::BoardNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_boards_newest_first() {
        let db = SqliteGateway::open_in_memory().unwrap();
        let owner = UserId::from("alice");
        let mut older = Board::new("older", owner.clone());
        older.created_at = Utc::now() - chrono::Duration::days(1);
        let newer = Board::new("newer", owner.clone());
        let foreign = Board::new("foreign", UserId::from("bob"));
        for board in [&older, &newer, &foreign] {
            db.insert_board(board).await.unwrap();
        }

        let boards = db.list_boards(&owner).await.unwrap();
        let names: Vec<&str> = boards.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_activity_newest_first_with_limit() {
        let db = SqliteGateway::open_in_memory().unwrap();
        for op in ["add card", "move card", "delete card"] {
            let entry = LogEntry::succeeded(op, json!({}), json!({"ok": true}), Duration::ZERO)
                .with_actor("alice");
            db.append_activity(&entry).await.unwrap();
        }

        let all = db.read_activity(None, None).await.unwrap();
        let ops: Vec<&str> = all.iter().map(|e| e.op.as_str()).collect();
        assert_eq!(ops, vec!["delete card", "move card", "add card"]);

        let latest = db.read_activity(None, Some(1)).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].op, "delete card");
        assert_eq!(latest[0].actor.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_activity_filtered_by_actor_in_query() {
        let db = SqliteGateway::open_in_memory().unwrap();
        for (op, actor) in [("add card", "alice"), ("add card", "bob"), ("move card", "alice")] {
            let entry = LogEntry::succeeded(op, json!({}), json!({}), Duration::ZERO)
                .with_actor(actor);
            db.append_activity(&entry).await.unwrap();
        }
        let unattributed = LogEntry::succeeded("delete card", json!({}), json!({}), Duration::ZERO);
        db.append_activity(&unattributed).await.unwrap();

        let alice = db.read_activity(Some("alice"), None).await.unwrap();
        let ops: Vec<&str> = alice.iter().map(|e| e.op.as_str()).collect();
        assert_eq!(ops, vec!["move card", "add card"]);

        let latest = db.read_activity(Some("alice"), Some(1)).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].op, "move card");

        assert!(db.read_activity(Some("carol"), None).await.unwrap().is_empty());
        assert_eq!(db.read_activity(None, None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_open_on_disk_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("board.db");
        let board = Board::new("Durable", UserId::from("alice"));
        {
            let db = SqliteGateway::open(&path).unwrap();
            assert_eq!(db.path(), Some(path.as_path()));
            db.insert_board(&board).await.unwrap();
        }

        let reopened = SqliteGateway::open(&path).unwrap();
        assert_eq!(reopened.fetch_board(&board.id).await.unwrap().name, "Durable");
    }
}
