//! Test Helpers

use crate::{
    domain::carts::{
        CartsService, CartsServiceError,
        data::{CartItemPayload, NewCart},
        records::{CartItemRecord, CartRecord, CartUuid},
    },
    test::TestContext,
};

pub(crate) fn item_payload(name: &str, price: u64, quantity: u16) -> CartItemPayload {
    CartItemPayload {
        name: name.to_string(),
        price,
        quantity,
    }
}

pub(crate) async fn create_cart(ctx: &TestContext) -> Result<CartRecord, CartsServiceError> {
    ctx.carts.create_cart(NewCart::default()).await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    cart: CartUuid,
    name: &str,
    price: u64,
    quantity: u16,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_cart_item(cart, item_payload(name, price, quantity))
        .await
}

/// Count the rows of the item store directly, bypassing the service.
pub(crate) async fn cart_item_rows(ctx: &TestContext) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
        .fetch_one(ctx.db.pool())
        .await
        .expect("Failed to count cart item rows")
}
