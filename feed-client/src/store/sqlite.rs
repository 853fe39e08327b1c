//! SQLite cache backend.

use super::{CacheError, CacheStore, ScanPage};
use async_trait::async_trait;
use feed_types::{Post, PostId, ScanCursor};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// SQLite-based post cache.
///
/// One row per post id, with the full record stored as a JSON document
/// beside the key. Schema drift on the wire therefore never needs a
/// migration here; only the id column matters to SQL. Uses WAL mode for
/// concurrent reads/writes.
#[derive(Clone)]
pub struct SqliteCache {
    pool: SqlitePool,
}

impl SqliteCache {
    /// Open a cache database at the given path.
    ///
    /// Creates the database file if it doesn't exist.
    pub async fn open(path: &Path) -> Result<Self, CacheError> {
        let options = SqliteConnectOptions::from_str(path.to_str().unwrap_or("posts.db"))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let cache = Self { pool };
        cache.run_migrations().await?;
        Ok(cache)
    }

    /// Create an in-memory cache (for testing).
    pub async fn in_memory() -> Result<Self, CacheError> {
        let options = SqliteConnectOptions::from_str(":memory:")?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let cache = Self { pool };
        cache.run_migrations().await?;
        Ok(cache)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), CacheError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY,
                record TEXT NOT NULL,
                cached_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn upsert_all(&self, posts: &[Post]) -> Result<(), CacheError> {
        if posts.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for post in posts {
            let record = serde_json::to_string(post).map_err(|e| CacheError::Corrupt {
                id: post.id,
                message: e.to_string(),
            })?;

            sqlx::query(
                r#"
                INSERT INTO posts (id, record)
                VALUES (?1, ?2)
                ON CONFLICT(id) DO UPDATE SET record = excluded.record
                "#,
            )
            .bind(post.id.value() as i64)
            .bind(record)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Post>, CacheError> {
        let rows = sqlx::query_as::<_, PostRow>("SELECT id, record FROM posts ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn read_page_after(
        &self,
        after: Option<ScanCursor>,
        limit: u32,
    ) -> Result<ScanPage, CacheError> {
        // -1 sorts before every valid id, including 0.
        let after_id = after.map(|c| c.last_seen().value() as i64).unwrap_or(-1);

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, record FROM posts
            WHERE id > ?1
            ORDER BY id ASC
            LIMIT ?2
            "#,
        )
        .bind(after_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let posts: Vec<Post> = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        let next = posts.last().map(|post| ScanCursor::after(post.id));

        Ok(ScanPage { posts, next })
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, CacheError> {
        let row = sqlx::query_as::<_, PostRow>("SELECT id, record FROM posts WHERE id = ?1")
            .bind(id.value() as i64)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Post::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, CacheError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

/// Internal row type for SQLite queries.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    record: String,
}

impl TryFrom<PostRow> for Post {
    type Error = CacheError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        serde_json::from_str(&row.record).map_err(|e| CacheError::Corrupt {
            id: PostId::new(row.id as u64),
            message: e.to_string(),
        })
    }
}
