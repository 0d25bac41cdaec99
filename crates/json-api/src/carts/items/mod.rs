//! Cart Item Endpoints

mod handlers;

pub(crate) use handlers::{create, index, update};
