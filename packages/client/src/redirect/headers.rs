//! Header adjustments between redirect hops

use http::header::{
    AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, HOST, PROXY_AUTHORIZATION,
    TRANSFER_ENCODING, WWW_AUTHENTICATE,
};
use http::{HeaderValue, Uri};

use crate::http::Headers;

/// Whether `next` points at a different host or port than `previous`.
///
/// An origin-form `next` stays on the current connection target.
pub(crate) fn is_cross_host(previous: &Uri, next: &Uri) -> bool {
    if next.host().is_none() {
        return false;
    }
    !previous.host().is_some_and(|host| {
        next.host().is_some_and(|next_host| host.eq_ignore_ascii_case(next_host))
    }) || port_or_known_default(previous) != port_or_known_default(next)
}

fn port_or_known_default(uri: &Uri) -> Option<u16> {
    uri.port_u16().or_else(|| match uri.scheme_str() {
        Some("https") => Some(443),
        Some("http") => Some(80),
        _ => None,
    })
}

/// Remove credentials when redirecting across different hosts/ports
pub(crate) fn remove_sensitive_headers(headers: &mut Headers) {
    headers.remove(AUTHORIZATION.as_str());
    headers.remove(COOKIE.as_str());
    headers.remove("cookie2");
    headers.remove(PROXY_AUTHORIZATION.as_str());
    headers.remove(WWW_AUTHENTICATE.as_str());
}

/// Drop headers describing content that is no longer sent.
pub(crate) fn remove_content_headers(headers: &mut Headers) {
    headers.remove(CONTENT_LENGTH.as_str());
    headers.remove(CONTENT_TYPE.as_str());
    headers.remove(TRANSFER_ENCODING.as_str());
}

/// Point an existing `Host` header at the authority of `next`.
pub(crate) fn rewrite_host(headers: &mut Headers, next: &Uri) {
    if !headers.contains(HOST.as_str()) {
        return;
    }
    if let Some(value) = next
        .authority()
        .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
    {
        headers.insert(HOST, value);
    }
}
