//! Strict client-side cookie encoding (RFC 6265 section 4.2.1)

use ::cookie::Cookie;
use http::HeaderValue;

use crate::error::{self, InvalidCookie, Result};

/// Encodes `cookie` as a `Cookie` request header value (`name=value`).
///
/// Attributes (path, domain, expiry) are not sent by clients and are
/// ignored. Names must be RFC 7230 tokens and values RFC 6265
/// cookie-octets, optionally wrapped in one pair of double quotes.
pub fn encode_strict(cookie: &Cookie<'_>) -> Result<HeaderValue> {
    validate_cookie(cookie.name(), cookie.value())
        .map_err(|reason| error::builder(InvalidCookie(reason)))?;
    HeaderValue::from_str(&format!("{}={}", cookie.name(), cookie.value())).map_err(error::builder)
}

/// Validate cookie name and value according to RFC 6265.
///
/// # Errors
///
/// Returns the reason as a `String` if the name is empty or not a token,
/// or if the value contains a byte outside the cookie-octet set.
pub fn validate_cookie(name: &str, value: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("cookie name cannot be empty".to_string());
    }

    if let Some(ch) = name.chars().find(|&ch| !is_token_char(ch)) {
        return Err(format!("invalid character {ch:?} in cookie name"));
    }

    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    if let Some(ch) = unquoted.chars().find(|&ch| !is_cookie_octet(ch)) {
        return Err(format!("invalid character {ch:?} in cookie value"));
    }

    Ok(())
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(ch)
}

fn is_cookie_octet(ch: char) -> bool {
    matches!(ch, '\x21' | '\x23'..='\x2B' | '\x2D'..='\x3A' | '\x3C'..='\x5B' | '\x5D'..='\x7E')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_name_value_only() {
        let cookie = Cookie::build(("session", "abc123")).path("/").secure(true).build();
        assert_eq!(encode_strict(&cookie).unwrap(), "session=abc123");
    }

    #[test]
    fn accepts_quoted_values() {
        assert!(validate_cookie("id", "\"quoted\"").is_ok());
    }

    #[test]
    fn rejects_separators_and_spaces() {
        assert!(validate_cookie("bad name", "v").is_err());
        assert!(validate_cookie("name", "has space").is_err());
        assert!(validate_cookie("name", "semi;colon").is_err());
        assert!(validate_cookie("", "v").is_err());
        assert!(encode_strict(&Cookie::new("k", "a,b")).unwrap_err().is_builder());
    }
}
