//! PostgreSQL Repository Implementations

use chrono::Utc;
use sqlx::PgPool;

use crate::domain::entities::{NonceRecord, WalletAccount};
use crate::domain::repository::{NonceRepository, WalletAccountRepository};
use crate::error::SiwnResult;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgSiwnRepository {
    pool: PgPool,
}

impl PgSiwnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove nonces past their expiry.
    ///
    /// Runs at startup and from any external scheduler; the login path
    /// never depends on it because `consume` filters on expiry itself.
    pub async fn cleanup_expired(&self) -> SiwnResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM siwn_nonces WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(nonces = deleted, "Cleaned up expired login nonces");

        Ok(deleted)
    }
}

impl NonceRepository for PgSiwnRepository {
    async fn create(&self, record: &NonceRecord) -> SiwnResult<()> {
        sqlx::query(
            r#"
            INSERT INTO siwn_nonces (
                nonce_id,
                wallet_address,
                nonce,
                expires_at_ms
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.into_uuid())
        .bind(&record.address)
        .bind(&record.nonce)
        .bind(record.expires_at_ms)
        .execute(&self.pool)
        .await?;

        tracing::info!(nonce_id = %record.id, "Nonce created");

        Ok(())
    }

    async fn consume(&self, address: &str, nonce: &str) -> SiwnResult<bool> {
        let now_ms = Utc::now().timestamp_millis();

        // Single conditional delete: row-level locking guarantees at most
        // one of two concurrent consumers gets the row. Expired rows never
        // match and are not reported differently from missing ones.
        let row = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            DELETE FROM siwn_nonces
            WHERE wallet_address = $1 AND nonce = $2 AND expires_at_ms > $3
            RETURNING nonce_id
            "#,
        )
        .bind(address)
        .bind(nonce)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(nonce_id) => {
                tracing::info!(nonce_id = %nonce_id, "Nonce consumed");
                Ok(true)
            }
            None => {
                tracing::debug!(address = %address, "No consumable nonce");
                Ok(false)
            }
        }
    }
}

impl WalletAccountRepository for PgSiwnRepository {
    async fn find_by_address(&self, address: &str) -> SiwnResult<Option<WalletAccount>> {
        let row = sqlx::query_as::<_, WalletAccountRow>(
            r#"
            SELECT account_id, wallet_address, provider
            FROM siwn_wallet_accounts
            WHERE wallet_address = $1
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WalletAccountRow::into_wallet_account))
    }

    async fn create(&self, account: &WalletAccount) -> SiwnResult<WalletAccount> {
        // Insert-or-keep: the no-op update makes RETURNING yield the
        // surviving row when a concurrent first login already created the
        // mapping, so both racers read the same account id.
        let row = sqlx::query_as::<_, WalletAccountRow>(
            r#"
            INSERT INTO siwn_wallet_accounts (wallet_address, account_id, provider)
            VALUES ($1, $2, $3)
            ON CONFLICT (wallet_address)
            DO UPDATE SET wallet_address = EXCLUDED.wallet_address
            RETURNING account_id, wallet_address, provider
            "#,
        )
        .bind(&account.address)
        .bind(&account.account_id)
        .bind(&account.provider)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            address = %account.address,
            account_id = %row.account_id,
            "Wallet mapping resolved"
        );

        Ok(row.into_wallet_account())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct WalletAccountRow {
    account_id: String,
    wallet_address: String,
    provider: String,
}

impl WalletAccountRow {
    fn into_wallet_account(self) -> WalletAccount {
        WalletAccount {
            account_id: self.account_id,
            address: self.wallet_address,
            provider: self.provider,
        }
    }
}
