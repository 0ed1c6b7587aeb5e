use crate::connection::ConnectionProvider;
use crate::DbError;
use async_trait::async_trait;
use core_types::{NewTransaction, Product, TransactionDetail};
use sqlx::mysql::{MySql, MySqlConnection};
use sqlx::{Connection, Transaction};

/// The data access operations the POS endpoints rely on.
#[async_trait]
pub trait PosStore: Send + Sync {
    /// Returns the first catalog row whose code equals `code`, if any.
    async fn find_product_by_code(&self, code: &str) -> Result<Option<Product>, DbError>;

    /// Writes a transaction header and its detail rows atomically and returns
    /// the `TRD_ID` assigned to the header.
    async fn record_transaction(
        &self,
        header: &NewTransaction,
        details: &[TransactionDetail],
    ) -> Result<i64, DbError>;

    /// Whether the connection settings look usable. Does not connect.
    fn is_configured(&self) -> bool;
}

/// The `DbRepository` is the MySQL-backed [`PosStore`]. It encapsulates all SQL
/// queries and opens a fresh connection for every call.
#[derive(Debug, Clone)]
pub struct DbRepository {
    provider: ConnectionProvider,
}

impl DbRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    async fn select_product(conn: &mut MySqlConnection, code: &str) -> Result<Option<Product>, DbError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT PRD_ID AS prd_id, CODE AS prd_code, NAME AS prd_name, PRICE AS prd_price
            FROM m_product
            WHERE CODE = ?
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(product)
    }

    /// Runs the inserts inside one transaction. Rolls back on any failure.
    async fn insert_transaction(
        conn: &mut MySqlConnection,
        header: &NewTransaction,
        details: &[TransactionDetail],
    ) -> Result<i64, DbError> {
        let mut tx = conn.begin().await.map_err(DbError::PersistenceError)?;

        match Self::insert_rows(&mut tx, header, details).await {
            Ok(trd_id) => {
                tx.commit().await.map_err(DbError::PersistenceError)?;
                Ok(trd_id)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed; the connection will be discarded.");
                }
                Err(DbError::PersistenceError(e))
            }
        }
    }

    async fn insert_rows(
        tx: &mut Transaction<'_, MySql>,
        header: &NewTransaction,
        details: &[TransactionDetail],
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO t_txn (DATETIME, EMP_CD, STORE_CD, POS_NO, TOTAL_AMT, TTL_AMT_EX_TAX)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(header.datetime)
        .bind(&header.emp_cd)
        .bind(&header.store_cd)
        .bind(&header.pos_no)
        .bind(header.total_amt)
        .bind(header.ttl_amt_ex_tax)
        .execute(&mut **tx)
        .await?;

        let trd_id = i64::try_from(result.last_insert_id())
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        tracing::info!(trd_id, "Transaction header inserted.");

        for detail in details {
            sqlx::query(
                r#"
                INSERT INTO t_txn_dtl (TRD_ID, DTL_ID, PRD_ID, PRD_CODE, PRD_NAME, PRD_PRICE, TAX_CD)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(trd_id)
            .bind(detail.dtl_id)
            .bind(detail.prd_id)
            .bind(&detail.prd_code)
            .bind(&detail.prd_name)
            .bind(detail.prd_price)
            .bind(&detail.tax_cd)
            .execute(&mut **tx)
            .await?;
        }

        Ok(trd_id)
    }
}

#[async_trait]
impl PosStore for DbRepository {
    async fn find_product_by_code(&self, code: &str) -> Result<Option<Product>, DbError> {
        let mut conn = self.provider.acquire().await?;
        let result = Self::select_product(&mut conn, code).await;
        conn.release().await;

        if let Err(e) = &result {
            tracing::error!(code, error = %e, "Product lookup failed.");
        }
        result
    }

    async fn record_transaction(
        &self,
        header: &NewTransaction,
        details: &[TransactionDetail],
    ) -> Result<i64, DbError> {
        let mut conn = self.provider.acquire().await?;
        let result = Self::insert_transaction(&mut conn, header, details).await;
        conn.release().await;

        if let Err(e) = &result {
            tracing::error!(error = %e, details = details.len(), "Transaction was rolled back.");
        }
        result
    }

    fn is_configured(&self) -> bool {
        self.provider.settings().is_configured()
    }
}
