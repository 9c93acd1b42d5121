//! Product route handlers.

use aitoy_core::{ModelKind, PresentationContext, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{Product, SortOrder};
use crate::filters;
use crate::middleware::PageContext;
use crate::scene::{ModelViewport, Placement};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub url: String,
    /// Serialized [`ModelViewport`] for the card thumbnail.
    pub viewport_json: String,
}

impl ProductView {
    /// View for a product card.
    #[must_use]
    pub fn card(product: &Product) -> Self {
        Self::with_viewport(
            product,
            &ModelViewport::new(product.model_kind, PresentationContext::Card),
        )
    }

    fn with_viewport(product: &Product, viewport: &ModelViewport) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            url: product.url(),
            viewport_json: viewport.to_json(),
        }
    }
}

/// Grid or list layout for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Listing query parameters.
///
/// Unrecognised `sort` or `view` values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
    pub view: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: PageContext,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub query: String,
    pub sort: SortOrder,
    pub view: ViewMode,
    pub showcase_json: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub product: ProductView,
}

/// Product not found template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub page: PageContext,
}

/// Display product listing page.
#[instrument(skip(state, page))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let sort = query
        .sort
        .as_deref()
        .and_then(|s| s.parse::<SortOrder>().ok())
        .unwrap_or_default();
    let view = match query.view.as_deref() {
        Some("list") => ViewMode::List,
        _ => ViewMode::Grid,
    };

    let products: Vec<ProductView> = state
        .catalog()
        .search(&query.q, sort)
        .into_iter()
        .map(ProductView::card)
        .collect();

    let showcase = ModelViewport::new(ModelKind::Elephant, PresentationContext::Detail)
        .placed(Placement::new(0.5, [0.0; 3]));

    ProductsIndexTemplate {
        page,
        products,
        total: state.catalog().len(),
        query: query.q.trim().to_string(),
        sort,
        view,
        showcase_json: showcase.to_json(),
    }
}

/// Display product detail page, or the not-found view with status 404.
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(id): Path<String>,
) -> Response {
    let Some(product) = state.catalog().find(&ProductId::new(id.as_str())) else {
        tracing::debug!(product_id = %id, "product not found");
        return (StatusCode::NOT_FOUND, ProductNotFoundTemplate { page }).into_response();
    };

    let viewport = ModelViewport::new(product.model_kind, PresentationContext::Detail)
        .placed(Placement::new(2.0, [0.0, -0.5, 0.0]));

    ProductShowTemplate {
        page,
        product: ProductView::with_viewport(product, &viewport),
    }
    .into_response()
}
