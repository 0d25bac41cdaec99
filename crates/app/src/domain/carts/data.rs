//! Cart Data

/// New Cart Data
///
/// A cart may be created empty or with initial items. Initial payloads are
/// validated with the same rules as [`CartItemPayload`] on add, and the
/// cart's total is always derived from them, never supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCart {
    pub items: Vec<CartItemPayload>,
}

/// Cart Item Payload
///
/// The caller-supplied portion of an item, shared by item creation and
/// item update. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemPayload {
    pub name: String,
    pub price: u64,
    pub quantity: u16,
}
