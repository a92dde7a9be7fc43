//! Postgres-backed party store.
//!
//! ## Schema
//!
//! `migrate()` creates the `parties` table if it is missing. `seq` is a
//! `BIGSERIAL` used only to keep insertion order among records with equal
//! `created_at`.
//!
//! ## Error Mapping
//!
//! Every SQLx error (connection, pool closed, constraint, decode) becomes
//! `StoreError::Unavailable` tagged with the operation name.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use tarragona_core::{Clock, PartyId, SystemClock};
use tarragona_parties::{PartyRecord, PricedParty};
use tarragona_reporting::DateRange;

use super::r#trait::{PartyStore, StoreError};
use super::storage_timestamp;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS parties (
    seq             BIGSERIAL PRIMARY KEY,
    id              UUID        NOT NULL UNIQUE,
    identity        TEXT        NOT NULL,
    guest_count     BIGINT      NOT NULL CHECK (guest_count >= 1),
    duration_hours  BIGINT      NOT NULL CHECK (duration_hours >= 1),
    guest_amount    BIGINT      NOT NULL CHECK (guest_amount >= 0),
    duration_amount BIGINT      NOT NULL CHECK (duration_amount >= 0),
    total           BIGINT      NOT NULL CHECK (total = guest_amount + duration_amount),
    created_at      TIMESTAMPTZ NOT NULL
)
"#;

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS parties_created_at_idx ON parties (created_at DESC, seq)";

const SELECT_COLUMNS: &str = "id, identity, guest_count, duration_hours, guest_amount, duration_amount, total, created_at";

/// Postgres-backed party store.
///
/// `Send + Sync`; shares the SQLx pool across requests.
#[derive(Debug, Clone)]
pub struct PostgresPartyStore<C = SystemClock> {
    pool: Arc<PgPool>,
    clock: C,
}

impl PostgresPartyStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }

    /// Connect and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }
}

impl<C: Clock> PostgresPartyStore<C> {
    pub fn with_clock(pool: PgPool, clock: C) -> Self {
        Self {
            pool: Arc::new(pool),
            clock,
        }
    }

    /// Create the `parties` table and its ordering index if missing.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in [CREATE_TABLE, CREATE_INDEX] {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }

    async fn fetch(
        &self,
        operation: &'static str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<PartyRecord>, StoreError> {
        let sql = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM parties
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            ORDER BY created_at DESC, seq ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        rows.iter()
            .map(|row| decode_row(row).map_err(|e| map_sqlx_error(operation, e)))
            .collect()
    }
}

#[async_trait]
impl<C: Clock> PartyStore for PostgresPartyStore<C> {
    #[instrument(skip(self, party), fields(guests = party.party.guest_count(), hours = party.party.duration_hours()), err)]
    async fn insert(&self, party: PricedParty) -> Result<PartyRecord, StoreError> {
        let record = party.into_record(PartyId::new(), storage_timestamp(self.clock.now()));

        sqlx::query(
            r#"
            INSERT INTO parties
                (id, identity, guest_count, duration_hours, guest_amount, duration_amount, total, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.identity)
        .bind(i64::from(record.guest_count))
        .bind(i64::from(record.duration_hours))
        .bind(to_i64("insert", record.guest_amount)?)
        .bind(to_i64("insert", record.duration_amount)?)
        .bind(to_i64("insert", record.total)?)
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(record)
    }

    async fn list_recent(&self) -> Result<Vec<PartyRecord>, StoreError> {
        self.fetch("list_recent", None, None).await
    }

    async fn query_in_range(&self, range: DateRange) -> Result<Vec<PartyRecord>, StoreError> {
        self.fetch("query_in_range", range.start(), range.end()).await
    }

    #[instrument(skip(self), err)]
    async fn clear_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM parties")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear_all", e))?;
        Ok(result.rows_affected())
    }
}

fn to_i64(operation: &'static str, amount: u64) -> Result<i64, StoreError> {
    i64::try_from(amount)
        .map_err(|_| StoreError::unavailable(operation, format!("amount {amount} exceeds BIGINT")))
}

fn decode_row(row: &sqlx::postgres::PgRow) -> Result<PartyRecord, sqlx::Error> {
    let unsigned = |column: &str| -> Result<u64, sqlx::Error> {
        let value: i64 = row.try_get(column)?;
        u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    };
    let count = |column: &str| -> Result<u32, sqlx::Error> {
        let value: i64 = row.try_get(column)?;
        u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    };

    Ok(PartyRecord {
        id: PartyId::from_uuid(row.try_get("id")?),
        identity: row.try_get("identity")?,
        guest_count: count("guest_count")?,
        duration_hours: count("duration_hours")?,
        guest_amount: unsigned("guest_amount")?,
        duration_amount: unsigned("duration_amount")?,
        total: unsigned("total")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    let reason = match &err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => format!("database error {code}: {}", db_err.message()),
            None => format!("database error: {}", db_err.message()),
        },
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        other => other.to_string(),
    };
    tracing::warn!(operation, %reason, "party store operation failed");
    StoreError::unavailable(operation, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_beyond_bigint_are_refused() {
        assert_eq!(to_i64("insert", 2_700_000).unwrap(), 2_700_000);
        assert!(matches!(
            to_i64("insert", u64::MAX),
            Err(StoreError::Unavailable { operation: "insert", .. })
        ));
    }

    #[test]
    fn sqlx_errors_become_unavailable() {
        let err = map_sqlx_error("list_recent", sqlx::Error::PoolClosed);
        assert_eq!(
            err.to_string(),
            "record store unavailable during list_recent: connection pool closed"
        );
    }
}
