//! Cart Endpoints

pub(crate) mod errors;
pub(crate) mod items;
pub(crate) mod requests;

mod handlers;

pub(crate) use handlers::{create, delete, get, index};
