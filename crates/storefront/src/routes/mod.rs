//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, featured products, scroll scene)
//! GET  /about                  - About page
//! GET  /contact                - Contact page
//! POST /contact                - Contact form submission (simulated)
//!
//! # Products
//! GET  /products               - Catalog (?q=, ?sort=name|price-low|price-high, ?view=grid|list)
//! GET  /product/{id}           - Product detail (404 view for unknown ids)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! POST /cart/clear             - Clear cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Auth (simulated)
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action
//! POST /logout                 - Logout action
//!
//! # Theme
//! POST /theme/toggle           - Flip light/dark and redirect back
//!
//! # API
//! GET  /api/scene              - Landing scroll scene (JSON)
//! GET  /api/scene/frame?p=&from= - Scene sampled at a scroll fraction (JSON)
//!
//! # Assets
//! GET  /models/{*path}         - 3D model files
//! ```

pub mod api;
pub mod assets;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;
pub mod theme;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/scene", get(api::scene::scene))
        .route("/scene/frame", get(api::scene::frame))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/contact", get(contact::show).post(contact::submit))
        // Catalog
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
        // Theme
        .route("/theme/toggle", post(theme::toggle))
        // JSON API
        .nest("/api", api_routes())
        // 3D assets
        .route("/models/{*path}", get(assets::model))
}
