//! Security headers middleware.
//!
//! Adds security headers to all responses:
//! - Content-Security-Policy
//! - X-Content-Type-Options
//! - X-Frame-Options

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy used when the script origin cannot be embedded.
const CSP_FALLBACK: &str = "default-src 'self'; \
                            script-src 'self'; \
                            style-src 'self' 'unsafe-inline'; \
                            img-src 'self' data: https:; \
                            frame-ancestors 'none'";

/// Scheme and authority of an absolute URL.
fn origin(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")? + 3;
    let authority_len = url[scheme_end..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - scheme_end);
    (authority_len > 0).then(|| &url[..scheme_end + authority_len])
}

/// Content-Security-Policy allowing scripts from the renderer script origin.
///
/// mermaid.js injects `<style>` elements into the SVGs it renders, so inline
/// styles stay allowed.
fn csp(script_url: &str) -> String {
    let script_src = origin(script_url).map_or_else(
        || "'self'".to_owned(),
        |origin| format!("'self' {origin}"),
    );
    format!(
        "default-src 'self'; \
         script-src {script_src}; \
         style-src 'self' 'unsafe-inline'; \
         img-src 'self' data: https:; \
         frame-ancestors 'none'"
    )
}

/// Create layer that adds Content-Security-Policy header.
pub(crate) fn csp_layer(script_url: &str) -> SetResponseHeaderLayer<HeaderValue> {
    let value = HeaderValue::from_str(&csp(script_url)).unwrap_or_else(|_| {
        tracing::warn!(script_url, "Script URL not usable in CSP header");
        HeaderValue::from_static(CSP_FALLBACK)
    });
    SetResponseHeaderLayer::overriding(HeaderName::from_static("content-security-policy"), value)
}

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds X-Frame-Options header.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    )
}
