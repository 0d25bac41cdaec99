//! Shared cart request payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use trolley_app::domain::carts::data::CartItemPayload;

/// Cart Item Payload
///
/// Accepted both when adding a new item and when replacing an existing one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    /// Display name of the item
    pub name: String,

    /// Unit price in minor currency units
    pub price: u64,

    /// Number of units
    pub quantity: u16,
}

impl From<CartItemRequest> for CartItemPayload {
    fn from(request: CartItemRequest) -> Self {
        Self {
            name: request.name,
            price: request.price,
            quantity: request.quantity,
        }
    }
}
