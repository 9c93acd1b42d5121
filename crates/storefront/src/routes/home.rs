//! Home page route handler.

use aitoy_core::{ModelKind, PresentationContext};
use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;
use crate::routes::products::ProductView;
use crate::scene::{ModelViewport, Placement, ScrollBinding};
use crate::state::AppState;

/// Section the hero model tracks while the visitor scrolls.
pub const PRODUCTS_SECTION_ID: &str = "products-section";

/// Id of the hero section.
pub const HERO_SECTION_ID: &str = "hero";

/// Section ids `home.html` renders, in page order.
pub const HOME_SECTION_IDS: &[&str] = &[HERO_SECTION_ID, PRODUCTS_SECTION_ID];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<ProductView>,
    pub hero_section_id: &'static str,
    pub products_section_id: &'static str,
    /// Serialized hero [`ModelViewport`].
    pub hero_json: String,
    /// Serialized landing [`crate::scene::Scene`].
    pub scene_json: String,
}

/// Hero viewport bound to scroll, tracking the products section when the
/// page declares it.
fn hero_viewport(page_sections: &[&str]) -> ModelViewport {
    ModelViewport::new(ModelKind::Elephant, PresentationContext::Hero)
        .placed(Placement::new(2.0, [0.0, -0.5, 0.0]))
        .scroll_bound(ScrollBinding::parallax().tracking(PRODUCTS_SECTION_ID, page_sections))
}

/// Display home page.
#[instrument(skip(state, page))]
pub async fn home(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    let hero = hero_viewport(HOME_SECTION_IDS);

    HomeTemplate {
        page,
        featured: state
            .catalog()
            .featured()
            .iter()
            .map(ProductView::card)
            .collect(),
        hero_section_id: HERO_SECTION_ID,
        products_section_id: PRODUCTS_SECTION_ID,
        hero_json: hero.to_json(),
        scene_json: state.scene().to_json(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_tracks_products_section() {
        let hero = hero_viewport(HOME_SECTION_IDS);
        let binding = hero.scroll.as_ref().map(|b| b.target.as_deref());
        assert_eq!(binding, Some(Some(PRODUCTS_SECTION_ID)));
    }

    #[test]
    fn test_hero_without_products_section_is_untargeted() {
        let hero = hero_viewport(&[HERO_SECTION_ID]);
        let binding = hero.scroll.as_ref().map(|b| b.target.as_deref());
        assert_eq!(binding, Some(None));
    }
}
