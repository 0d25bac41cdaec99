//! Update Cart Item Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, items::index::CartItemResponse, requests::CartItemRequest},
    extensions::*,
};

/// Update Cart Item Handler
///
/// Replaces the item's name, price and quantity, keeping its identity and
/// owning cart, and refreshes the owning cart's total.
#[endpoint(
    tags("cart-items"),
    summary = "Update Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<CartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let item = state
        .app
        .carts
        .update_cart_item(item.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
