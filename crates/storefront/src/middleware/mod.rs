//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Locale (wraps the router; strips or adds the `/en`, `/ar` prefix)
//! 2. Sentry layers (capture errors)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Security headers (CSP, frame and isolation policies)
//! 6. Session layer (tower-sessions with `PostgreSQL` store)
//! 7. Rate limiting on login and registration (governor)

pub mod auth;
pub mod locale;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, RequireAdmin, RequireAuth, clear_current_user, set_current_user};
pub use locale::{LocalePath, locale_middleware, request_locale};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
