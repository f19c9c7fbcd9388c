//! Cart line repository.
//!
//! One row per add action: adding the same product twice creates two lines.
//! Lines move `Submitted -> Pending` in bulk when the customer confirms
//! their cart; admins may set any status afterwards.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cornershop_core::types::{CartLineId, CartStatus, ProductId};

use super::RepositoryError;
use crate::models::cart::CartLine;

/// Database row shape for `cart_lines`.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    customer_username: String,
    product_id: uuid::Uuid,
    quantity: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl CartLineRow {
    fn into_line(self) -> Result<CartLine, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity in cart line {}",
                self.id
            ))
        })?;
        Ok(CartLine {
            id: CartLineId::new(self.id),
            customer_username: self.customer_username,
            product_id: ProductId::from_uuid(self.product_id),
            quantity,
            status: CartStatus::from(self.status),
            created_at: self.created_at,
        })
    }
}

/// Repository for cart line operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines, every customer. Admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, customer_username, product_id, quantity, status, created_at
            FROM cart_lines
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }

    /// Cart lines belonging to one customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for(&self, username: &str) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, customer_username, product_id, quantity, status, created_at
            FROM cart_lines
            WHERE customer_username = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(username)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }

    /// Fetch a single cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CartLineId) -> Result<Option<CartLine>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, customer_username, product_id, quantity, status, created_at
            FROM cart_lines
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(CartLineRow::into_line).transpose()
    }

    /// Add a line with status `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(
        &self,
        username: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, RepositoryError> {
        let quantity = i32::try_from(quantity).map_err(|_| {
            RepositoryError::Conflict("quantity exceeds the supported range".to_owned())
        })?;
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            INSERT INTO cart_lines (customer_username, product_id, quantity, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_username, product_id, quantity, status, created_at
            ",
        )
        .bind(username)
        .bind(product_id.as_uuid())
        .bind(quantity)
        .bind(CartStatus::submitted().as_str())
        .fetch_one(self.pool)
        .await?;

        row.into_line()
    }

    /// Set a line's status to an arbitrary value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    pub async fn update_status(
        &self,
        id: CartLineId,
        status: &CartStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE cart_lines
            SET status = $1
            WHERE id = $2
            ",
        )
        .bind(status.as_str())
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a line.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, id: CartLineId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_lines
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bulk-transition one customer's `Submitted` lines to `Pending`.
    ///
    /// Returns the affected lines in their post-transition state. Empty if
    /// the customer had nothing submitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn confirm_submitted(
        &self,
        username: &str,
    ) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            UPDATE cart_lines
            SET status = $1
            WHERE customer_username = $2 AND status = $3
            RETURNING id, customer_username, product_id, quantity, status, created_at
            ",
        )
        .bind(CartStatus::pending().as_str())
        .bind(username)
        .bind(CartStatus::submitted().as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }
}
