//! Redirect budget and state machine

use http::{Method, StatusCode};

/// Hops followed when redirects are enabled with a plain `true`.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Signed sentinel for "redirects disabled" when limits are given as `i32`.
pub const NO_REDIRECTS: i32 = -1;

/// Configured redirect budget for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectLimit {
    #[default]
    Disabled,
    Max(u32),
}

impl RedirectLimit {
    /// State at the start of a hop chain.
    #[must_use]
    pub fn initial_state(self) -> RedirectState {
        match self {
            RedirectLimit::Disabled => RedirectState::Disabled,
            RedirectLimit::Max(n) => RedirectState::Active(n),
        }
    }
}

impl From<bool> for RedirectLimit {
    fn from(follow: bool) -> Self {
        if follow {
            RedirectLimit::Max(DEFAULT_MAX_REDIRECTS)
        } else {
            RedirectLimit::Disabled
        }
    }
}

impl From<u32> for RedirectLimit {
    fn from(max: u32) -> Self {
        RedirectLimit::Max(max)
    }
}

impl From<i32> for RedirectLimit {
    fn from(max: i32) -> Self {
        u32::try_from(max).map_or(RedirectLimit::Disabled, RedirectLimit::Max)
    }
}

/// Position in a hop chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectState {
    Disabled,
    Active(u32),
    Exhausted,
}

impl RedirectState {
    /// Remaining hops, `-1` when disabled.
    #[must_use]
    pub fn hops_remaining(self) -> i64 {
        match self {
            RedirectState::Disabled => i64::from(NO_REDIRECTS),
            RedirectState::Active(n) => i64::from(n),
            RedirectState::Exhausted => 0,
        }
    }

    /// Whether another hop may be followed.
    #[must_use]
    pub fn can_follow(self) -> bool {
        matches!(self, RedirectState::Active(n) if n > 0)
    }

    /// State after following one hop.
    #[must_use]
    pub fn after_hop(self) -> Self {
        match self {
            RedirectState::Active(n) if n > 1 => RedirectState::Active(n - 1),
            RedirectState::Active(_) | RedirectState::Exhausted => RedirectState::Exhausted,
            RedirectState::Disabled => RedirectState::Disabled,
        }
    }
}

/// Whether `status` asks the client to re-request elsewhere.
#[must_use]
pub fn is_redirect_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Method for the next hop after `status` answered a `method` request.
///
/// 303 switches to GET (HEAD stays HEAD); 301 and 302 switch POST to GET.
/// 307 and 308 keep the method.
#[must_use]
pub fn redirect_method(status: StatusCode, method: &Method) -> Method {
    match status {
        StatusCode::SEE_OTHER if *method != Method::HEAD => Method::GET,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND if *method == Method::POST => Method::GET,
        _ => method.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_map_to_initial_states() {
        assert_eq!(RedirectLimit::from(false).initial_state(), RedirectState::Disabled);
        assert_eq!(
            RedirectLimit::from(true).initial_state(),
            RedirectState::Active(DEFAULT_MAX_REDIRECTS)
        );
        assert_eq!(RedirectLimit::from(NO_REDIRECTS), RedirectLimit::Disabled);
        assert_eq!(RedirectLimit::from(0i32).initial_state(), RedirectState::Active(0));
    }

    #[test]
    fn hop_counter_strictly_decreases() {
        let mut state = RedirectLimit::from(3u32).initial_state();
        let mut followed = 0;
        while state.can_follow() {
            let next = state.after_hop();
            assert!(next.hops_remaining() < state.hops_remaining());
            state = next;
            followed += 1;
        }
        assert_eq!(followed, 3);
        assert_eq!(state, RedirectState::Exhausted);
        assert!(!RedirectState::Active(0).can_follow());
        assert!(!RedirectState::Disabled.can_follow());
    }

    #[test]
    fn method_rewrites() {
        assert_eq!(redirect_method(StatusCode::SEE_OTHER, &Method::POST), Method::GET);
        assert_eq!(redirect_method(StatusCode::SEE_OTHER, &Method::HEAD), Method::HEAD);
        assert_eq!(redirect_method(StatusCode::FOUND, &Method::POST), Method::GET);
        assert_eq!(redirect_method(StatusCode::FOUND, &Method::PUT), Method::PUT);
        assert_eq!(redirect_method(StatusCode::TEMPORARY_REDIRECT, &Method::POST), Method::POST);
        assert_eq!(redirect_method(StatusCode::PERMANENT_REDIRECT, &Method::DELETE), Method::DELETE);
    }

    #[test]
    fn redirect_class() {
        for code in [301, 302, 303, 307, 308] {
            assert!(is_redirect_status(StatusCode::from_u16(code).unwrap()));
        }
        for code in [200, 300, 304, 305, 404] {
            assert!(!is_redirect_status(StatusCode::from_u16(code).unwrap()));
        }
    }
}
