//! Redirect target resolution

use http::Uri;
use http::header::LOCATION;
use url::Url;

use crate::http::{RequestDescriptor, ResponseHead};

/// Finds where a redirect-class response points.
pub trait RedirectTargetResolver: Send + Sync {
    /// A usable target for the next hop, or `None` if there is none.
    fn resolve(&self, request: &RequestDescriptor, response: &ResponseHead) -> Option<Uri>;
}

/// Resolves the `Location` header against the current request URI.
///
/// Absolute locations are used as given. Relative ones are joined onto the
/// request URI; when that URI is origin-form (`/path?query`) the result
/// stays origin-form. Only `http` and `https` targets are usable and any
/// fragment is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationResolver;

const ORIGIN_FORM_BASE: &str = "http://origin-form.invalid";

impl RedirectTargetResolver for LocationResolver {
    fn resolve(&self, request: &RequestDescriptor, response: &ResponseHead) -> Option<Uri> {
        let location = response.headers.get_str(LOCATION.as_str())?.trim();
        if location.is_empty() {
            return None;
        }
        resolve_location(request.uri(), location)
    }
}

fn resolve_location(current: &Uri, location: &str) -> Option<Uri> {
    let origin_form = current.scheme().is_none() || current.authority().is_none();
    let base = if origin_form {
        let path = current.path_and_query().map_or("/", |pq| pq.as_str());
        Url::parse(ORIGIN_FORM_BASE).ok()?.join(path).ok()?
    } else {
        Url::parse(&current.to_string()).ok()?
    };

    let mut next = base.join(location).ok()?;
    if !matches!(next.scheme(), "http" | "https") {
        return None;
    }
    next.set_fragment(None);

    let stays_origin_form = origin_form && is_path_reference(location);
    let text = if stays_origin_form {
        match next.query() {
            Some(query) => format!("{}?{query}", next.path()),
            None => next.path().to_owned(),
        }
    } else {
        next.to_string()
    };
    text.parse().ok()
}

/// True for a reference carrying neither scheme nor authority.
fn is_path_reference(location: &str) -> bool {
    let network_path = location
        .as_bytes()
        .get(..2)
        .is_some_and(|lead| lead.iter().all(|b| matches!(b, b'/' | b'\\')));
    !network_path && matches!(Url::parse(location), Err(url::ParseError::RelativeUrlWithoutBase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(current: &'static str, location: &str) -> Option<String> {
        resolve_location(&Uri::from_static(current), location).map(|u| u.to_string())
    }

    #[test]
    fn absolute_locations_win() {
        assert_eq!(
            resolve("http://a.test/x", "https://b.test/y?z=1").as_deref(),
            Some("https://b.test/y?z=1")
        );
        assert_eq!(resolve("/x", "http://b.test/y").as_deref(), Some("http://b.test/y"));
    }

    #[test]
    fn relative_locations_join() {
        assert_eq!(resolve("http://a.test/dir/page", "other").as_deref(), Some("http://a.test/dir/other"));
        assert_eq!(resolve("http://a.test/dir/page", "/root").as_deref(), Some("http://a.test/root"));
        assert_eq!(resolve("/dir/page?q=1", "next?p=2").as_deref(), Some("/dir/next?p=2"));
        assert_eq!(resolve("/dir/page", "/moved#frag").as_deref(), Some("/moved"));
    }

    #[test]
    fn absolute_location_leaves_origin_form() {
        assert_eq!(
            resolve("/start", "http://origin-form.invalid/elsewhere").as_deref(),
            Some("http://origin-form.invalid/elsewhere")
        );
        assert_eq!(resolve("/start", "//b.test/y").as_deref(), Some("http://b.test/y"));
    }

    #[test]
    fn unusable_locations() {
        assert_eq!(resolve("http://a.test/", "mailto:someone@a.test"), None);
        assert_eq!(resolve("http://a.test/", "ftp://a.test/file"), None);
    }
}
