#![forbid(unsafe_code)]

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use crate::utils::db_statements::{GET_HELLO_BY_ID, INSERT_HELLO};
use crate::utils::db_types::{Hello, HelloInput};
use crate::utils::errors::StoreError;

// ***************************************************************************
//                              Store Interface
// ***************************************************************************
/// The record store over the hellos table.  Implementations durably store
/// and retrieve greeting records; ids are unique and assigned by the store,
/// and the creation timestamp is set exactly once at insertion time.
#[async_trait]
pub trait HelloStore: Send + Sync {
    /// Insert one record and return it with the store-assigned id and
    /// creation timestamp populated.
    async fn create(&self, input: HelloInput) -> Result<Hello, StoreError>;

    /// Fetch a record by id.
    async fn get(&self, id: i32) -> Result<Option<Hello>, StoreError>;
}

// ***************************************************************************
//                             Postgres Store
// ***************************************************************************
pub struct PgHelloStore {
    db: Pool<Postgres>,
}

impl PgHelloStore {
    pub fn new(db: Pool<Postgres>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HelloStore for PgHelloStore {
    // A single-row insert is intrinsically atomic, so no explicit
    // transaction is opened here.
    async fn create(&self, input: HelloInput) -> Result<Hello, StoreError> {
        let row = sqlx::query(INSERT_HELLO)
            .bind(&input.name)
            .bind(&input.message)
            .fetch_one(&self.db)
            .await
            .map_err(map_sqlx_error)?;

        hello_from_row(&row)
    }

    async fn get(&self, id: i32) -> Result<Option<Hello>, StoreError> {
        let row = sqlx::query(GET_HELLO_BY_ID)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(r) => Ok(Some(hello_from_row(&r)?)),
            None => Ok(None),
        }
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello_from_row:
// ---------------------------------------------------------------------------
fn hello_from_row(row: &PgRow) -> Result<Hello, StoreError> {
    Ok(Hello {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        name: row.try_get("name").map_err(map_sqlx_error)?,
        message: row.try_get("message").map_err(map_sqlx_error)?,
        created: row.try_get("createdAt").map_err(map_sqlx_error)?,
    })
}

// ---------------------------------------------------------------------------
// map_sqlx_error:
// ---------------------------------------------------------------------------
/** Fold driver errors into the store's taxonomy.  SQLSTATE class 22 (data
 * exception, e.g. value too long for varchar(100)) and class 23 (integrity
 * constraint violation, e.g. null message) are constraint violations;
 * everything else counts as the store being unavailable.
 */
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(dbe) => {
            let code = dbe.code().map(|c| c.to_string()).unwrap_or_default();
            if is_constraint_code(&code) {
                StoreError::ConstraintViolation(dbe.to_string())
            } else {
                StoreError::Unavailable(dbe.to_string())
            }
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// is_constraint_code:
// ---------------------------------------------------------------------------
fn is_constraint_code(code: &str) -> bool {
    code.starts_with("22") || code.starts_with("23")
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_codes_classified() {
        // String data right truncation: name longer than varchar(100).
        assert!(is_constraint_code("22001"));
        // Not-null violation: empty message backstop.
        assert!(is_constraint_code("23502"));
        // Connection failure is not a constraint problem.
        assert!(!is_constraint_code("08006"));
        assert!(!is_constraint_code(""));
    }

    #[test]
    fn non_database_errors_are_unavailable() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
