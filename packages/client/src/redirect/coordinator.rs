//! Deciding whether a response ends the hop chain

use std::sync::Arc;

use http::{StatusCode, Uri};

use super::headers::{is_cross_host, remove_content_headers, remove_sensitive_headers, rewrite_host};
use super::policy::{RedirectState, is_redirect_status, redirect_method};
use super::resolver::{LocationResolver, RedirectTargetResolver};
use crate::http::{RequestDescriptor, ResponseHead};

/// Why a response is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Redirects were never enabled.
    Disabled,
    /// Not a redirect-class status.
    Final,
    /// Redirect-class, but the hop budget is spent.
    BudgetSpent,
    /// Redirect-class without a usable target.
    NoTarget,
}

/// Outcome of classifying one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    Deliver(Delivery),
    Follow { target: Uri, next: RedirectState },
}

/// The next hop: its descriptor and whether the content is sent again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextHop {
    pub request: RequestDescriptor,
    pub keep_content: bool,
}

/// Bounded redirect state machine.
#[derive(Clone)]
pub struct RedirectCoordinator {
    resolver: Arc<dyn RedirectTargetResolver>,
    strip_sensitive_headers: bool,
}

impl std::fmt::Debug for RedirectCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectCoordinator")
            .field("strip_sensitive_headers", &self.strip_sensitive_headers)
            .finish_non_exhaustive()
    }
}

impl Default for RedirectCoordinator {
    fn default() -> Self {
        Self::new(Arc::new(LocationResolver))
    }
}

impl RedirectCoordinator {
    #[must_use]
    pub fn new(resolver: Arc<dyn RedirectTargetResolver>) -> Self {
        Self {
            resolver,
            strip_sensitive_headers: true,
        }
    }

    #[must_use]
    pub fn strip_sensitive_headers(mut self, strip: bool) -> Self {
        self.strip_sensitive_headers = strip;
        self
    }

    /// Classifies `response` to `request` in `state`.
    #[must_use]
    pub fn decide(
        &self,
        state: RedirectState,
        request: &RequestDescriptor,
        response: &ResponseHead,
    ) -> RedirectDecision {
        if state == RedirectState::Disabled {
            return RedirectDecision::Deliver(Delivery::Disabled);
        }
        if !is_redirect_status(response.status) {
            return RedirectDecision::Deliver(Delivery::Final);
        }
        if !state.can_follow() {
            tracing::warn!(
                target: "reqflow::redirect",
                status = response.status.as_u16(),
                uri = %request.uri(),
                "redirect budget spent, returning redirect response"
            );
            return RedirectDecision::Deliver(Delivery::BudgetSpent);
        }
        match self.resolver.resolve(request, response) {
            Some(target) => RedirectDecision::Follow {
                target,
                next: state.after_hop(),
            },
            None => {
                tracing::warn!(
                    target: "reqflow::redirect",
                    status = response.status.as_u16(),
                    uri = %request.uri(),
                    "redirect response without usable location"
                );
                RedirectDecision::Deliver(Delivery::NoTarget)
            }
        }
    }

    /// Derives the request for the hop to `target`.
    #[must_use]
    pub fn next_hop(&self, request: &RequestDescriptor, status: StatusCode, target: Uri) -> NextHop {
        let method = redirect_method(status, request.method());
        let keep_content = method == *request.method();
        let cross_host = is_cross_host(request.uri(), &target);
        let strip = self.strip_sensitive_headers && cross_host;

        let next = request
            .map_headers(|headers| {
                if !keep_content {
                    remove_content_headers(headers);
                }
                if strip {
                    remove_sensitive_headers(headers);
                }
                if cross_host {
                    rewrite_host(headers, &target);
                }
            })
            .with_uri(target)
            .set_method(method);

        NextHop {
            request: next,
            keep_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::LOCATION;
    use http::{HeaderValue, Method, Version};

    fn post(uri: &'static str) -> RequestDescriptor {
        RequestDescriptor::new(Version::HTTP_11, Method::POST, Uri::from_static(uri))
            .set_header("content-type", "text/plain")
            .unwrap()
            .set_header("authorization", "Bearer t")
            .unwrap()
    }

    fn redirect(status: StatusCode, location: &'static str) -> ResponseHead {
        let mut head = ResponseHead::new(status);
        head.headers.append(LOCATION, HeaderValue::from_static(location));
        head
    }

    #[test]
    fn disabled_and_spent_deliver() {
        let coordinator = RedirectCoordinator::default();
        let request = post("/a");
        let response = redirect(StatusCode::FOUND, "/b");

        assert_eq!(
            coordinator.decide(RedirectState::Disabled, &request, &response),
            RedirectDecision::Deliver(Delivery::Disabled)
        );
        assert_eq!(
            coordinator.decide(RedirectState::Active(0), &request, &response),
            RedirectDecision::Deliver(Delivery::BudgetSpent)
        );
        assert_eq!(
            coordinator.decide(RedirectState::Exhausted, &request, &response),
            RedirectDecision::Deliver(Delivery::BudgetSpent)
        );
    }

    #[test]
    fn missing_location_delivers() {
        let coordinator = RedirectCoordinator::default();
        let decision = coordinator.decide(
            RedirectState::Active(3),
            &post("/a"),
            &ResponseHead::new(StatusCode::MOVED_PERMANENTLY),
        );
        assert_eq!(decision, RedirectDecision::Deliver(Delivery::NoTarget));
    }

    #[test]
    fn follows_with_decremented_budget() {
        let coordinator = RedirectCoordinator::default();
        let decision = coordinator.decide(
            RedirectState::Active(3),
            &post("/a/b"),
            &redirect(StatusCode::TEMPORARY_REDIRECT, "c"),
        );
        assert_eq!(
            decision,
            RedirectDecision::Follow {
                target: Uri::from_static("/a/c"),
                next: RedirectState::Active(2),
            }
        );
    }

    #[test]
    fn see_other_drops_content() {
        let hop = RedirectCoordinator::default().next_hop(
            &post("/submit"),
            StatusCode::SEE_OTHER,
            Uri::from_static("/result"),
        );
        assert!(!hop.keep_content);
        assert_eq!(hop.request.method(), Method::GET);
        assert!(!hop.request.contains_header("content-type"));
        assert!(hop.request.contains_header("authorization"));
    }

    #[test]
    fn temporary_redirect_keeps_content() {
        let hop = RedirectCoordinator::default().next_hop(
            &post("http://a.test/submit"),
            StatusCode::TEMPORARY_REDIRECT,
            Uri::from_static("http://b.test/submit"),
        );
        assert!(hop.keep_content);
        assert_eq!(hop.request.method(), Method::POST);
        assert!(hop.request.contains_header("content-type"));
        assert!(!hop.request.contains_header("authorization"));
    }

    #[test]
    fn stripping_can_be_disabled() {
        let hop = RedirectCoordinator::default()
            .strip_sensitive_headers(false)
            .next_hop(
                &post("http://a.test/"),
                StatusCode::PERMANENT_REDIRECT,
                Uri::from_static("http://b.test/"),
            );
        assert!(hop.request.contains_header("authorization"));
    }
}
