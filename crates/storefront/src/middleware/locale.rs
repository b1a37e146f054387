//! Locale-prefix middleware.
//!
//! Every storefront page lives under `/en/...` or `/ar/...`. This middleware
//! wraps the whole router (it must run before routing):
//!
//! - `/api`, `/static`, `/health` and `/favicon.ico` pass through untouched.
//! - A path with a locale prefix is rewritten without it (`/ar/cart` is routed
//!   as `/cart`), the [`Locale`] is stored in request extensions, and the
//!   `locale` cookie is updated.
//! - Any other path gets a `307` to the same path under the visitor's locale:
//!   cookie first, then `Accept-Language`, then the configured default.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue, StatusCode, Uri,
        header::{ACCEPT_LANGUAGE, COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use elegant_core::Locale;

/// Cookie remembering the visitor's last locale.
pub const LOCALE_COOKIE: &str = "locale";

/// Path prefixes served without a locale.
const BYPASS_PREFIXES: &[&str] = &["/api", "/static", "/health"];

/// The request path and query with the locale prefix removed.
///
/// Used for the language toggle and for redirects back to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePath(pub String);

impl LocalePath {
    /// The same page under `locale`.
    #[must_use]
    pub fn under(&self, locale: Locale) -> String {
        let (path, query) = match self.0.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.0.as_str(), None),
        };
        match query {
            Some(q) => format!("{}?{q}", locale.prefix(path)),
            None => locale.prefix(path),
        }
    }
}

fn is_bypassed(path: &str) -> bool {
    path == "/favicon.ico"
        || BYPASS_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
}

fn cookie_locale(headers: &HeaderMap) -> Option<Locale> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == LOCALE_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn preferred_locale(headers: &HeaderMap, default: Locale) -> Locale {
    cookie_locale(headers)
        .or_else(|| {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(Locale::negotiate)
        })
        .unwrap_or(default)
}

fn locale_cookie(locale: Locale) -> Option<HeaderValue> {
    let cookie = Cookie::build((LOCALE_COOKIE, locale.code()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .build();
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Resolve, strip, or redirect on the locale prefix.
pub async fn locale_middleware(
    State(default_locale): State<Locale>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);

    if is_bypassed(&path) {
        let locale = preferred_locale(request.headers(), default_locale);
        request.extensions_mut().insert(locale);
        return next.run(request).await;
    }

    let Some((locale, rest)) = Locale::strip_prefix(&path) else {
        let locale = preferred_locale(request.headers(), default_locale);
        let target = match query {
            Some(q) => format!("{}?{q}", locale.prefix(&path)),
            None => locale.prefix(&path),
        };
        return Redirect::temporary(&target).into_response();
    };

    let rewritten = match &query {
        Some(q) => format!("{rest}?{q}"),
        None => rest,
    };
    let Ok(uri) = rewritten.parse::<Uri>() else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let remembered = cookie_locale(request.headers());
    *request.uri_mut() = uri;
    request.extensions_mut().insert(locale);
    request.extensions_mut().insert(LocalePath(rewritten));

    tracing::Span::current().record("locale", locale.code());

    let mut response = next.run(request).await;
    if remembered != Some(locale)
        && let Some(cookie) = locale_cookie(locale)
    {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

/// The locale stored by [`locale_middleware`].
///
/// Requests that never went through the middleware (unit tests) use Arabic,
/// the store's default.
#[must_use]
pub fn request_locale(parts: &Parts) -> Locale {
    parts.extensions.get::<Locale>().copied().unwrap_or(Locale::Ar)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, header::LOCATION},
        routing::get,
    };
    use tower::{Layer, ServiceExt};

    use super::*;

    async fn echo(
        Extension(locale): Extension<Locale>,
        Extension(path): Extension<LocalePath>,
        uri: Uri,
    ) -> String {
        format!("{locale} {} {}", uri, path.0)
    }

    async fn api(Extension(locale): Extension<Locale>) -> String {
        format!("api {locale}")
    }

    async fn send(request: HttpRequest<Body>) -> Response {
        let router = Router::new()
            .route("/", get(echo))
            .route("/products/{id}", get(echo))
            .route("/api/products", get(api));
        axum::middleware::from_fn_with_state(Locale::Ar, locale_middleware)
            .layer(router)
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_prefixed_path_is_rewritten() {
        let response = send(
            HttpRequest::get("/en/products/3?size=M")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("locale=en"));
        assert_eq!(
            body_text(response).await,
            "en /products/3?size=M /products/3?size=M"
        );
    }

    #[tokio::test]
    async fn test_bare_locale_routes_to_root() {
        let response = send(HttpRequest::get("/ar").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ar / /");
    }

    #[tokio::test]
    async fn test_unprefixed_path_redirects_to_default() {
        let response = send(HttpRequest::get("/products/3").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/ar/products/3");
    }

    #[tokio::test]
    async fn test_redirect_prefers_cookie_then_accept_language() {
        let response = send(
            HttpRequest::get("/products/3?color=Black")
                .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/en/products/3?color=Black"
        );

        let response = send(
            HttpRequest::get("/")
                .header(ACCEPT_LANGUAGE, "en-US")
                .header(COOKIE, "theme=dark; locale=ar")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/ar");
    }

    #[tokio::test]
    async fn test_api_bypasses_prefixing() {
        let response = send(
            HttpRequest::get("/api/products")
                .header(COOKIE, "locale=en")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "api en");
    }

    #[tokio::test]
    async fn test_matching_cookie_is_not_rewritten() {
        let response = send(
            HttpRequest::get("/ar/products/1")
                .header(COOKIE, "locale=ar")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn test_is_bypassed() {
        assert!(is_bypassed("/api/products"));
        assert!(is_bypassed("/static/css/main.css"));
        assert!(is_bypassed("/health"));
        assert!(is_bypassed("/favicon.ico"));
        assert!(!is_bypassed("/apiary"));
        assert!(!is_bypassed("/products"));
    }

    #[test]
    fn test_locale_path_under_other_locale() {
        let path = LocalePath("/products?sort=name".to_owned());
        assert_eq!(path.under(Locale::En), "/en/products?sort=name");
        assert_eq!(LocalePath("/".to_owned()).under(Locale::Ar), "/ar");
    }
}
