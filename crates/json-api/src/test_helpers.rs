//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use trolley_app::{
    context::AppContext,
    domain::carts::{
        MockCartsService,
        records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
    },
};

use crate::state::State;

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::from_app_context(AppContext {
        carts: Arc::new(carts),
    })
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .push(route),
    )
}

pub(crate) fn make_cart(uuid: CartUuid) -> CartRecord {
    CartRecord {
        uuid,
        total_price: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: None,
    }
}

pub(crate) fn make_item(uuid: CartItemUuid, cart: CartUuid) -> CartItemRecord {
    CartItemRecord {
        uuid,
        cart_uuid: cart,
        name: "Apples".to_string(),
        price: 10,
        quantity: 2,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: None,
    }
}
