//! Add Cart Item Handler

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, items::index::CartItemResponse, requests::CartItemRequest},
    extensions::*,
};

/// Add Cart Item Handler
///
/// Validates the payload, stores the item and refreshes the owning cart's
/// total before responding.
#[endpoint(
    tags("cart-items"),
    summary = "Add Cart Item",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let cart = cart.into_inner();

    let item = state
        .app
        .carts
        .add_cart_item(cart.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{cart}/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
