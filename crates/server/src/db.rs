//! Postgres storage for completed analyses.

use anyhow::Context;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use lexiscope_core::{AnalysisResult, Headings, KeywordFrequencies, LexiscopeError, PersistenceSink, PosCounts};
use serde::Serialize;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use tokio_postgres::NoTls;
use tokio_postgres::Row;
use tokio_postgres::types::Json;
use uuid::Uuid;

const POOL_SIZE: usize = 16;

// `json` rather than `jsonb` so keyword rank order survives a round trip.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS url_data (
    id UUID PRIMARY KEY,
    url TEXT NOT NULL,
    num_words BIGINT NOT NULL,
    num_sentences BIGINT NOT NULL,
    pos_counts JSON NOT NULL,
    keywords_frequency JSON NOT NULL,
    image_count BIGINT NOT NULL,
    headings_used JSON NOT NULL,
    clean_text TEXT NOT NULL,
    main_heading TEXT,
    email TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS url_data_email_created_idx ON url_data (email, created_at DESC);
"#;

const SELECT_COLUMNS: &str = "id, url, num_words, num_sentences, pos_counts, keywords_frequency, image_count, \
     headings_used, clean_text, main_heading, email, content_hash, created_at";

/// A row of `url_data`.
#[derive(Debug, Clone, Serialize)]
pub struct StoredAnalysis {
    pub id: Uuid,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub content_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredAnalysis {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        let Json(pos_counts): Json<PosCounts> = row.try_get("pos_counts")?;
        let Json(keyword_frequency): Json<KeywordFrequencies> = row.try_get("keywords_frequency")?;
        let Json(headings): Json<Headings> = row.try_get("headings_used")?;

        let result = AnalysisResult {
            url: row.try_get("url")?,
            clean_text: row.try_get("clean_text")?,
            word_count: to_count(row.try_get("num_words")?),
            sentence_count: to_count(row.try_get("num_sentences")?),
            pos_counts,
            keyword_frequency,
            image_count: to_count(row.try_get("image_count")?),
            headings,
            main_heading: row.try_get("main_heading")?,
            requester: row.try_get("email")?,
        };

        Ok(Self {
            id: row.try_get("id")?,
            result,
            content_hash: row.try_get("content_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn to_column(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Hex SHA-256 of the clean text.
pub fn content_hash(clean_text: &str) -> String {
    format!("{:x}", Sha256::digest(clean_text.as_bytes()))
}

pub fn create_pool(database_url: &str) -> anyhow::Result<Pool> {
    let pg_config: tokio_postgres::Config = database_url.parse().context("Invalid DATABASE_URL")?;
    let manager = Manager::from_config(pg_config, NoTls, ManagerConfig { recycling_method: RecyclingMethod::Fast });

    Pool::builder(manager)
        .max_size(POOL_SIZE)
        .build()
        .context("Failed to build connection pool")
}

/// Creates the `url_data` table and its index when missing.
pub async fn bootstrap(pool: &Pool) -> anyhow::Result<()> {
    let client = pool.get().await.context("Failed to connect to database")?;
    client.batch_execute(SCHEMA).await.context("Failed to create schema")?;
    Ok(())
}

pub async fn insert_analysis(pool: &Pool, result: &AnalysisResult) -> anyhow::Result<Uuid> {
    let client = pool.get().await.context("Failed to connect to database")?;
    let id = Uuid::new_v4();

    client
        .execute(
            "INSERT INTO url_data (id, url, num_words, num_sentences, pos_counts, keywords_frequency, \
             image_count, headings_used, clean_text, main_heading, email, content_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            &[
                &id,
                &result.url,
                &to_column(result.word_count),
                &to_column(result.sentence_count),
                &Json(&result.pos_counts),
                &Json(&result.keyword_frequency),
                &to_column(result.image_count),
                &Json(&result.headings),
                &result.clean_text,
                &result.main_heading,
                &result.requester,
                &content_hash(&result.clean_text),
            ],
        )
        .await
        .context("Failed to insert analysis")?;

    Ok(id)
}

/// Analyses stored for one requester, newest first.
pub async fn list_by_requester(
    pool: &Pool, requester: &str, limit: i64, offset: i64,
) -> anyhow::Result<Vec<StoredAnalysis>> {
    let client = pool.get().await.context("Failed to connect to database")?;
    let query = format!(
        "SELECT {} FROM url_data WHERE email = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        SELECT_COLUMNS
    );
    let rows = client.query(&query, &[&requester, &limit, &offset]).await?;

    rows.iter()
        .map(StoredAnalysis::from_row)
        .collect::<Result<_, _>>()
        .context("Failed to decode stored analysis")
}

pub async fn count_by_requester(pool: &Pool, requester: &str) -> anyhow::Result<i64> {
    let client = pool.get().await.context("Failed to connect to database")?;
    let row = client
        .query_one("SELECT COUNT(*) FROM url_data WHERE email = $1", &[&requester])
        .await?;
    Ok(row.get(0))
}

/// Every stored analysis, newest first.
pub async fn list_all(pool: &Pool, limit: i64, offset: i64) -> anyhow::Result<Vec<StoredAnalysis>> {
    let client = pool.get().await.context("Failed to connect to database")?;
    let query = format!("SELECT {} FROM url_data ORDER BY created_at DESC LIMIT $1 OFFSET $2", SELECT_COLUMNS);
    let rows = client.query(&query, &[&limit, &offset]).await?;

    rows.iter()
        .map(StoredAnalysis::from_row)
        .collect::<Result<_, _>>()
        .context("Failed to decode stored analysis")
}

pub async fn count_all(pool: &Pool) -> anyhow::Result<i64> {
    let client = pool.get().await.context("Failed to connect to database")?;
    let row = client.query_one("SELECT COUNT(*) FROM url_data", &[]).await?;
    Ok(row.get(0))
}

/// Persistence sink writing each stored analysis as a `url_data` row.
#[derive(Clone)]
pub struct PgSink {
    pool: Pool,
}

impl PgSink {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl PersistenceSink for PgSink {
    async fn persist(&self, result: &AnalysisResult) -> lexiscope_core::Result<()> {
        let id = insert_analysis(&self.pool, result)
            .await
            .map_err(|e| LexiscopeError::Persistence(format!("{:#}", e)))?;
        tracing::debug!(%id, url = %result.url, "Inserted url_data row");
        Ok(())
    }
}
