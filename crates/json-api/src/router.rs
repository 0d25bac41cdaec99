//! App Router

use salvo::Router;

use crate::carts;

pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("carts")
                .get(carts::index::handler)
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .delete(carts::delete::handler)
                        .push(
                            Router::with_path("items")
                                .get(carts::items::index::handler)
                                .post(carts::items::create::handler),
                        ),
                ),
        )
        .push(Router::with_path("cart-items/{item}").put(carts::items::update::handler))
}
