//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session under
//! [`crate::models::session_keys::CART`]. Plain form posts (no `HX-Request`
//! header) redirect back to the cart page instead of returning a fragment.

use aitoy_core::{PresentationContext, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{PageContext, load_cart, save_cart};
use crate::models::{Cart, CartLine};
use crate::scene::ModelViewport;
use crate::state::AppState;

/// Event fired after any cart mutation so the badge refreshes.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub viewport_json: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let thumbnail = ModelViewport::new(line.product.model_kind, PresentationContext::Card)
            .with_class("cart-thumb")
            .auto_rotate(false);
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            url: line.product.url(),
            quantity: line.quantity,
            price: line.product.price.to_string(),
            line_price: line.line_price().to_string(),
            viewport_json: thumbnail.to_json(),
        }
    }
}

impl CartItemView {
    /// Quantity submitted by the minus button.
    #[must_use]
    pub fn decremented(&self) -> i64 {
        i64::from(self.quantity) - 1
    }

    /// Quantity submitted by the plus button.
    #[must_use]
    pub fn incremented(&self) -> i64 {
        i64::from(self.quantity) + 1
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.total_items(),
            subtotal: summary.subtotal.to_string(),
            tax: summary.tax.to_string(),
            total: summary.total.to_string(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"true"))
}

/// Respond to a cart mutation with the items fragment, or redirect plain posts.
fn items_response(headers: &HeaderMap, cart: &Cart) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }
    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
) -> impl IntoResponse {
    let cart = load_cart(&session, state.catalog()).await;
    CartShowTemplate {
        page,
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the updated count badge with an HTMX trigger so other cart
/// elements refresh.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id.trim());
    let Some(product) = state.catalog().find(&id) else {
        return Err(AppError::NotFound(format!("product {id}")));
    };

    let mut cart = load_cart(&session, state.catalog()).await;
    cart.add_to_cart(product);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    tracing::debug!(product_id = %id, items = cart.total_items(), "added to cart");

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response())
}

/// Update cart line quantity (HTMX).
///
/// Zero or negative quantities remove the line.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id.trim());
    let mut cart = load_cart(&session, state.catalog()).await;
    cart.update_quantity(&id, form.quantity);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Updated quantity", Some(&[("product_id", id.as_str())]));
    Ok(items_response(&headers, &cart))
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id.trim());
    let mut cart = load_cart(&session, state.catalog()).await;
    cart.remove_from_cart(&id);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
    Ok(items_response(&headers, &cart))
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response> {
    let mut cart = load_cart(&session, state.catalog()).await;
    cart.clear_cart();
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Cleared cart", None);
    Ok(items_response(&headers, &cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: load_cart(&session, state.catalog()).await.total_items(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_cart_view_totals() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add_to_cart(catalog.find(&ProductId::new("1")).unwrap());
        cart.add_to_cart(catalog.find(&ProductId::new("1")).unwrap());

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items.first().unwrap().line_price, "$299.98");
        assert_eq!(view.subtotal, "299.98");
        assert_eq!(view.tax, "24.00");
        assert_eq!(view.total, "323.98");
    }

    #[test]
    fn test_plain_post_redirects_to_cart() {
        let response = items_response(&HeaderMap::new(), &Cart::new());
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/cart");
    }
}
