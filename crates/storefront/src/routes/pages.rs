//! Static informational pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Display about page.
#[instrument(skip(page))]
pub async fn about(page: PageContext) -> impl IntoResponse {
    AboutTemplate { page }
}
