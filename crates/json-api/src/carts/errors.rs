//! Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found(),
        CartsServiceError::EmptyName => {
            StatusError::bad_request().brief("Item name must not be empty")
        }
        CartsServiceError::ZeroPrice => {
            StatusError::bad_request().brief("Item price must be positive")
        }
        CartsServiceError::ZeroQuantity => {
            StatusError::bad_request().brief("Item quantity must be positive")
        }
        CartsServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Cart total exceeds the representable range")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
