//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart or cart item not found")]
    NotFound,

    #[error("item name must not be empty")]
    EmptyName,

    #[error("item price must be greater than zero")]
    ZeroPrice,

    #[error("item quantity must be greater than zero")]
    ZeroQuantity,

    #[error("cart total exceeds the representable range")]
    TotalOverflow,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
