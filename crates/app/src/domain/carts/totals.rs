//! Cart total aggregation.

use crate::domain::carts::{
    errors::CartsServiceError,
    records::{CartItemRecord, CartUuid},
};

/// Compute a cart's total price from the full item-store contents.
///
/// Pure function of the cart and the scanned items: filters down to the
/// items owned by `cart` and sums `price * quantity`. A cart with no items
/// totals zero. Always called on a fresh scan, never memoized.
///
/// # Errors
///
/// Returns [`CartsServiceError::TotalOverflow`] when the sum does not fit
/// a `u64` of minor currency units.
pub(crate) fn cart_total(
    cart: CartUuid,
    items: &[CartItemRecord],
) -> Result<u64, CartsServiceError> {
    items
        .iter()
        .filter(|item| item.cart_uuid == cart)
        .try_fold(0_u64, |total, item| {
            let line_total = item
                .price
                .checked_mul(u64::from(item.quantity))
                .ok_or(CartsServiceError::TotalOverflow)?;

            total
                .checked_add(line_total)
                .ok_or(CartsServiceError::TotalOverflow)
        })
}
