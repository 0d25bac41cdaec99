//! Cart Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// `total_price` is derived state: it always equals the sum of
/// `price * quantity` over the items currently referencing this cart.
/// `updated_at` stays `None` until the first mutation that changes the
/// total or the cart's membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub total_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
///
/// `cart_uuid` is immutable after creation and must reference a cart that
/// currently exists; cascade deletion keeps that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u16,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}
