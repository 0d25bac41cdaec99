//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::carts::{
        data::{CartItemPayload, NewCart},
        errors::CartsServiceError,
        records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        repositories::{SqliteCartItemsRepository, SqliteCartsRepository},
        totals,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    carts_repository: SqliteCartsRepository,
    items_repository: SqliteCartItemsRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: SqliteCartsRepository::new(),
            items_repository: SqliteCartItemsRepository::new(),
        }
    }
}

fn validate_payload(payload: &CartItemPayload) -> Result<(), CartsServiceError> {
    if payload.name.is_empty() {
        return Err(CartsServiceError::EmptyName);
    }

    if payload.price == 0 {
        return Err(CartsServiceError::ZeroPrice);
    }

    if payload.quantity == 0 {
        return Err(CartsServiceError::ZeroQuantity);
    }

    Ok(())
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn list_carts(&self) -> Result<Vec<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let carts = self.carts_repository.list_carts(&mut tx).await?;

        tx.commit().await?;

        Ok(carts)
    }

    async fn get_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_cart(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.service.create_cart", skip(self, cart), err)]
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError> {
        for payload in &cart.items {
            validate_payload(payload)?;
        }

        let now = Timestamp::now();
        let uuid = CartUuid::new();

        let items: Vec<CartItemRecord> = cart
            .items
            .into_iter()
            .map(|payload| CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: uuid,
                name: payload.name,
                price: payload.price,
                quantity: payload.quantity,
                created_at: now,
                updated_at: None,
            })
            .collect();

        let record = CartRecord {
            uuid,
            total_price: totals::cart_total(uuid, &items)?,
            created_at: now,
            updated_at: None,
        };

        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.create_cart(&mut tx, &record).await?;

        for item in &items {
            self.items_repository.create_cart_item(&mut tx, item).await?;
        }

        tx.commit().await?;

        info!(cart_uuid = %record.uuid, items = items.len(), "created cart");

        Ok(record)
    }

    #[tracing::instrument(name = "carts.service.delete_cart", skip(self), fields(cart_uuid = %uuid), err)]
    async fn delete_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let snapshot = self.carts_repository.get_cart(&mut tx, uuid).await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        // Cascade: full scan of the item store, removing everything the
        // deleted cart owned. Same transaction, so the cart and its items
        // disappear together.
        let items = self.items_repository.list_cart_items(&mut tx).await?;

        let mut removed = 0_u64;

        for item in items.iter().filter(|item| item.cart_uuid == uuid) {
            removed += self
                .items_repository
                .delete_cart_item(&mut tx, item.uuid)
                .await?;
        }

        tx.commit().await?;

        info!(cart_uuid = %uuid, removed_items = removed, "deleted cart");

        Ok(snapshot)
    }

    #[tracing::instrument(name = "carts.service.add_cart_item", skip(self, payload), fields(cart_uuid = %cart), err)]
    async fn add_cart_item(
        &self,
        cart: CartUuid,
        payload: CartItemPayload,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart_record = self.carts_repository.get_cart(&mut tx, cart).await?;

        validate_payload(&payload)?;

        let now = Timestamp::now();

        let item = CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid: cart,
            name: payload.name,
            price: payload.price,
            quantity: payload.quantity,
            created_at: now,
            updated_at: None,
        };

        self.items_repository.create_cart_item(&mut tx, &item).await?;

        let items = self.items_repository.list_cart_items(&mut tx).await?;

        cart_record.total_price = totals::cart_total(cart, &items)?;
        cart_record.updated_at = Some(now);

        let rows_affected = self
            .carts_repository
            .update_cart(&mut tx, &cart_record)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(cart_uuid = %cart, item_uuid = %item.uuid, "added cart item");

        Ok(item)
    }

    #[tracing::instrument(name = "carts.service.update_cart_item", skip(self, payload), fields(item_uuid = %item), err)]
    async fn update_cart_item(
        &self,
        item: CartItemUuid,
        payload: CartItemPayload,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self.items_repository.get_cart_item(&mut tx, item).await?;

        validate_payload(&payload)?;

        let now = Timestamp::now();

        record.name = payload.name;
        record.price = payload.price;
        record.quantity = payload.quantity;
        record.updated_at = Some(now);

        let rows_affected = self
            .items_repository
            .update_cart_item(&mut tx, &record)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        // The owning cart must exist; a missing owner is a cascade
        // integrity fault and is surfaced, never skipped.
        let mut cart_record = self
            .carts_repository
            .get_cart(&mut tx, record.cart_uuid)
            .await?;

        let items = self.items_repository.list_cart_items(&mut tx).await?;

        cart_record.total_price = totals::cart_total(record.cart_uuid, &items)?;
        cart_record.updated_at = Some(now);

        let rows_affected = self
            .carts_repository
            .update_cart(&mut tx, &cart_record)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(item_uuid = %record.uuid, cart_uuid = %record.cart_uuid, "updated cart item");

        Ok(record)
    }

    async fn list_cart_items(
        &self,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self.items_repository.list_cart_items(&mut tx).await?;

        tx.commit().await?;

        Ok(items
            .into_iter()
            .filter(|item| item.cart_uuid == cart)
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// List every cart in creation order.
    async fn list_carts(&self) -> Result<Vec<CartRecord>, CartsServiceError>;

    /// Retrieve a single cart.
    async fn get_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Creates a new cart, optionally populated with validated initial
    /// items. The cart's total is derived from the items.
    async fn create_cart(&self, cart: NewCart) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart and every item referencing it, returning the cart's
    /// pre-deletion snapshot.
    async fn delete_cart(&self, uuid: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add an item to the given cart and refresh the cart's total.
    async fn add_cart_item(
        &self,
        cart: CartUuid,
        payload: CartItemPayload,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Replace an item's name, price and quantity and refresh the owning
    /// cart's total.
    async fn update_cart_item(
        &self,
        item: CartItemUuid,
        payload: CartItemPayload,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// List the items owned by the given cart in creation order.
    async fn list_cart_items(
        &self,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{add_item, cart_item_rows, create_cart, item_payload},
    };

    use super::*;

    #[tokio::test]
    async fn create_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;

        assert_eq!(cart.total_price, 0);
        assert!(cart.updated_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_cart_with_initial_items_derives_total() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx
            .carts
            .create_cart(NewCart {
                items: vec![item_payload("Apples", 10, 2), item_payload("Bread", 5, 1)],
            })
            .await?;

        assert_eq!(cart.total_price, 25);
        assert!(cart.updated_at.is_none());

        let items = ctx.carts.list_cart_items(cart.uuid).await?;

        assert_eq!(items.len(), 2, "expected both initial items persisted");
        assert_eq!(items[0].name, "Apples");
        assert_eq!(items[1].name, "Bread");

        Ok(())
    }

    #[tokio::test]
    async fn create_cart_rejects_invalid_initial_item() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .create_cart(NewCart {
                items: vec![item_payload("Apples", 10, 2), item_payload("Bread", 0, 1)],
            })
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ZeroPrice)),
            "expected ZeroPrice, got {result:?}"
        );

        let carts = ctx.carts.list_carts().await?;

        assert!(carts.is_empty(), "nothing may be persisted on rejection");
        assert_eq!(cart_item_rows(&ctx).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_returns_created_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let created = create_cart(&ctx).await?;
        let fetched = ctx.carts.get_cart(created.uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_cart(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_carts_empty_when_no_carts() -> TestResult {
        let ctx = TestContext::new().await;

        let carts = ctx.carts.list_carts().await?;

        assert!(carts.is_empty(), "expected no carts, got {carts:?}");

        Ok(())
    }

    #[tokio::test]
    async fn list_carts_returns_carts_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;

        let first = create_cart(&ctx).await?;
        let second = create_cart(&ctx).await?;
        let third = create_cart(&ctx).await?;

        let carts = ctx.carts.list_carts().await?;

        let uuids: Vec<CartUuid> = carts.iter().map(|cart| cart.uuid).collect();

        assert_eq!(uuids, vec![first.uuid, second.uuid, third.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_returns_pre_deletion_snapshot() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        let before = ctx.carts.get_cart(cart.uuid).await?;
        let snapshot = ctx.carts.delete_cart(cart.uuid).await?;

        assert_eq!(snapshot, before);
        assert_eq!(snapshot.total_price, 20);

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_removes_cart_and_items() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;
        add_item(&ctx, cart.uuid, "Bread", 5, 1).await?;

        let fetched = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(fetched.total_price, 25);

        ctx.carts.delete_cart(cart.uuid).await?;

        let get_result = ctx.carts.get_cart(cart.uuid).await;

        assert!(
            matches!(get_result, Err(CartsServiceError::NotFound)),
            "expected NotFound after deletion, got {get_result:?}"
        );

        let items_result = ctx.carts.list_cart_items(cart.uuid).await;

        assert!(
            matches!(items_result, Err(CartsServiceError::NotFound)),
            "expected NotFound for deleted cart's items, got {items_result:?}"
        );

        assert_eq!(cart_item_rows(&ctx).await, 0, "no orphan items may survive");

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.delete_cart(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_cart_keeps_other_carts_items() -> TestResult {
        let ctx = TestContext::new().await;

        let doomed = create_cart(&ctx).await?;
        let survivor = create_cart(&ctx).await?;

        add_item(&ctx, doomed.uuid, "Apples", 10, 2).await?;
        add_item(&ctx, survivor.uuid, "Bread", 5, 1).await?;
        add_item(&ctx, doomed.uuid, "Cheese", 7, 1).await?;

        ctx.carts.delete_cart(doomed.uuid).await?;

        let items = ctx.carts.list_cart_items(survivor.uuid).await?;

        assert_eq!(items.len(), 1, "survivor cart must keep its item");
        assert_eq!(items[0].name, "Bread");

        let survivor_record = ctx.carts.get_cart(survivor.uuid).await?;

        assert_eq!(survivor_record.total_price, 5);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_returns_created_item() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let item = add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        assert_eq!(item.cart_uuid, cart.uuid);
        assert_eq!(item.name, "Apples");
        assert_eq!(item.price, 10);
        assert_eq!(item.quantity, 2);
        assert!(item.updated_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_recomputes_owning_cart_total() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;

        add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        let after_first = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(after_first.total_price, 20);
        assert!(after_first.updated_at.is_some());

        add_item(&ctx, cart.uuid, "Bread", 5, 1).await?;

        let after_second = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(after_second.total_price, 25);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_cart_creates_no_item() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_cart_item(CartUuid::new(), item_payload("Apples", 10, 2))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        assert_eq!(cart_item_rows(&ctx).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_empty_name_leaves_store_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        let before = ctx.carts.get_cart(cart.uuid).await?;

        let result = ctx
            .carts
            .add_cart_item(cart.uuid, item_payload("", 10, 2))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::EmptyName)),
            "expected EmptyName, got {result:?}"
        );

        let after = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(after, before, "rejected add must not touch the cart");
        assert_eq!(cart_item_rows(&ctx).await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_price_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;

        let result = ctx
            .carts
            .add_cart_item(cart.uuid, item_payload("Apples", 0, 2))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ZeroPrice)),
            "expected ZeroPrice, got {result:?}"
        );

        assert_eq!(cart_item_rows(&ctx).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;

        let result = ctx
            .carts
            .add_cart_item(cart.uuid, item_payload("Apples", 10, 0))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ZeroQuantity)),
            "expected ZeroQuantity, got {result:?}"
        );

        assert_eq!(cart_item_rows(&ctx).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_overflowing_total_rolls_back() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;

        let result = ctx
            .carts
            .add_cart_item(cart.uuid, item_payload("Gold", u64::MAX, 2))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::TotalOverflow)),
            "expected TotalOverflow, got {result:?}"
        );

        assert_eq!(
            cart_item_rows(&ctx).await,
            0,
            "the item insert must roll back with the failed aggregation"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_item_adjusts_total_by_the_difference() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let item = add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;
        add_item(&ctx, cart.uuid, "Cheese", 7, 3).await?;

        let before = ctx.carts.get_cart(cart.uuid).await?;

        ctx.carts
            .update_cart_item(item.uuid, item_payload("Apples", 10, 5))
            .await?;

        let after = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(after.total_price, before.total_price + 30);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_replaces_payload_fields_only() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let item = add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        let updated = ctx
            .carts
            .update_cart_item(item.uuid, item_payload("Pears", 12, 4))
            .await?;

        assert_eq!(updated.uuid, item.uuid);
        assert_eq!(updated.cart_uuid, item.cart_uuid);
        assert_eq!(updated.created_at, item.created_at);
        assert_eq!(updated.name, "Pears");
        assert_eq!(updated.price, 12);
        assert_eq!(updated.quantity, 4);
        assert!(updated.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn update_item_marks_owning_cart_updated() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let item = add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        ctx.carts
            .update_cart_item(item.uuid, item_payload("Apples", 10, 3))
            .await?;

        let record = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(record.total_price, 30);
        assert!(record.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn update_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .update_cart_item(CartItemUuid::new(), item_payload("Apples", 10, 2))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_invalid_payload_leaves_item_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let item = add_item(&ctx, cart.uuid, "Apples", 10, 2).await?;

        let result = ctx
            .carts
            .update_cart_item(item.uuid, item_payload("Apples", 10, 0))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ZeroQuantity)),
            "expected ZeroQuantity, got {result:?}"
        );

        let items = ctx.carts.list_cart_items(cart.uuid).await?;

        assert_eq!(items, vec![item], "rejected update must not persist");

        Ok(())
    }

    #[tokio::test]
    async fn list_cart_items_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.list_cart_items(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_cart_items_empty_for_new_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = create_cart(&ctx).await?;
        let items = ctx.carts.list_cart_items(cart.uuid).await?;

        assert!(items.is_empty(), "expected no items, got {items:?}");

        Ok(())
    }

    #[tokio::test]
    async fn list_cart_items_returns_only_owned_items_in_order() -> TestResult {
        let ctx = TestContext::new().await;

        let cart_a = create_cart(&ctx).await?;
        let cart_b = create_cart(&ctx).await?;

        let first = add_item(&ctx, cart_a.uuid, "Apples", 10, 2).await?;
        add_item(&ctx, cart_b.uuid, "Bread", 5, 1).await?;
        let second = add_item(&ctx, cart_a.uuid, "Cheese", 7, 1).await?;

        let items = ctx.carts.list_cart_items(cart_a.uuid).await?;

        assert_eq!(items, vec![first, second]);

        Ok(())
    }
}
