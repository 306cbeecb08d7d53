//! HTTP-date header values (RFC 9110 IMF-fixdate)

use chrono::{DateTime, Utc};
use http::HeaderValue;

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats `date` as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
#[must_use]
pub fn format_http_date<D: Into<DateTime<Utc>>>(date: D) -> String {
    date.into().format(IMF_FIXDATE).to_string()
}

pub(crate) fn date_header_value<D: Into<DateTime<Utc>>>(date: D) -> HeaderValue {
    // IMF-fixdate is always visible ASCII.
    HeaderValue::from_str(&format_http_date(date))
        .unwrap_or_else(|_| HeaderValue::from_static("Thu, 01 Jan 1970 00:00:00 GMT"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_imf_fixdate() {
        let date = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(format_http_date(date), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn accepts_system_time() {
        let epoch = std::time::UNIX_EPOCH;
        assert_eq!(format_http_date(epoch), "Thu, 01 Jan 1970 00:00:00 GMT");
    }
}
