//! Cart Items Repository

use sqlx::{FromRow, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::carts::records::{CartItemRecord, CartItemUuid};

use super::carts::{decode_record, encode_record};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("../sql/get_cart_item.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Scan the whole item store in key order.
    ///
    /// There is no per-cart index; callers filter the scan by `cart_uuid`.
    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(GET_CART_ITEM_SQL)
            .bind(item.into_uuid().to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: &CartItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid().to_string())
            .bind(encode_record(item)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: &CartItemRecord,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid().to_string())
            .bind(encode_record(item)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid().to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        decode_record(row)
    }
}
