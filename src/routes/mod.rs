use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub mod catalog;
pub mod categories;
pub mod doc;
pub mod health;
pub mod notifications;
pub mod params;
pub mod products;
pub mod sliders;
pub mod statistics;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    let dashboard = Router::new()
        .nest("/products", products::router())
        .nest("/categories", categories::category_router())
        .nest("/subcategories", categories::subcategory_router())
        .nest("/statistics", statistics::router())
        .nest("/settings/sliders", sliders::router());

    Router::new()
        .nest("/dashboard", dashboard)
        .nest("/products", catalog::product_router())
        .route("/featuredProducts", get(catalog::featured_products))
        .route("/categories", get(catalog::list_categories))
        .nest("/notifications", notifications::router())
}
