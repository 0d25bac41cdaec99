//! Cart Item Index Handler

use std::string::ToString;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::records::CartItemRecord;

use crate::{carts::errors::into_status_error, extensions::*};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The unique identifier of the owning cart
    pub cart_uuid: Uuid,

    /// Display name of the item
    pub name: String,

    /// Unit price in minor currency units
    pub price: u64,

    /// Number of units
    pub quantity: u16,

    /// The date and time the item was created
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: Option<String>,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            cart_uuid: item.cart_uuid.into_uuid(),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemsResponse {
    /// The list of items in the cart
    pub items: Vec<CartItemResponse>,
}

/// Cart Item Index Handler
///
/// Returns the items of a cart in creation order.
#[endpoint(tags("cart-items"), summary = "List Cart Items")]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let items = state
        .app
        .carts
        .list_cart_items(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
