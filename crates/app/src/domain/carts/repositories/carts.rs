//! Carts Repository

use serde::{Serialize, de::DeserializeOwned};
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::carts::records::{CartRecord, CartUuid};

const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartsRepository;

impl SqliteCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CartRecord>, sqlx::Error> {
        query_as::<Sqlite, CartRecord>(LIST_CARTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Sqlite, CartRecord>(GET_CART_SQL)
            .bind(cart.into_uuid().to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: &CartRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_SQL)
            .bind(cart.uuid.into_uuid().to_string())
            .bind(encode_record(cart)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: &CartRecord,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_SQL)
            .bind(cart.uuid.into_uuid().to_string())
            .bind(encode_record(cart)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid().to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        decode_record(row)
    }
}

/// Serialize a record for storage in a store's `record` column.
pub(super) fn encode_record<T: Serialize>(record: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(record).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// Decode a record from a store row's `record` column.
pub(super) fn decode_record<T: DeserializeOwned>(row: &SqliteRow) -> sqlx::Result<T> {
    let record: String = row.try_get("record")?;

    serde_json::from_str(&record).map_err(|e| sqlx::Error::ColumnDecode {
        index: "record".to_string(),
        source: Box::new(e),
    })
}
