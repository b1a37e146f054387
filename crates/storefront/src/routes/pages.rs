//! Static content pages and the not-found fallback.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;

use crate::filters;
use crate::routes::page::PageContext;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
}

/// Display the about page.
pub async fn about(page: PageContext) -> AboutTemplate {
    AboutTemplate { page }
}

/// Display the contact page.
pub async fn contact(page: PageContext) -> ContactTemplate {
    ContactTemplate { page }
}

/// 404 page for unknown paths.
pub async fn not_found(page: PageContext) -> Response {
    page.not_found()
}
