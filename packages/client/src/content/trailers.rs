//! Trailer folding over emitted content units

use std::fmt;
use std::sync::Arc;

use http::HeaderMap;

use crate::http::Headers;

/// State that can be turned into trailing headers once content has ended.
pub trait TrailingHeaders {
    fn into_headers(self) -> Headers;
}

impl TrailingHeaders for Headers {
    fn into_headers(self) -> Headers {
        self
    }
}

impl TrailingHeaders for HeaderMap {
    fn into_headers(self) -> Headers {
        Headers::from(&self)
    }
}

/// One in-progress fold, scoped to a single attempt.
pub trait TrailerAccumulator<C>: Send {
    fn accept(&mut self, unit: &C);

    fn finish(self: Box<Self>) -> Headers;
}

/// Rule for computing trailers: an initial state plus a per-unit mutator.
///
/// The rule is reusable; [`start`](Self::start) creates a fresh fold from
/// the factory every time content is sequenced.
pub struct TrailerFold<C> {
    start: Arc<dyn Fn() -> Box<dyn TrailerAccumulator<C>> + Send + Sync>,
}

impl<C: 'static> TrailerFold<C> {
    pub fn new<T, F, M>(factory: F, mutator: M) -> Self
    where
        T: TrailingHeaders + Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
        M: Fn(T, &C) -> T + Send + Sync + 'static,
    {
        let mutator = Arc::new(mutator);
        Self {
            start: Arc::new(move || -> Box<dyn TrailerAccumulator<C>> {
                Box::new(Fold {
                    state: Some(factory()),
                    mutator: Arc::clone(&mutator),
                })
            }),
        }
    }

    pub fn start(&self) -> Box<dyn TrailerAccumulator<C>> {
        (self.start)()
    }
}

impl<C> Clone for TrailerFold<C> {
    fn clone(&self) -> Self {
        Self {
            start: Arc::clone(&self.start),
        }
    }
}

impl<C> fmt::Debug for TrailerFold<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailerFold").finish_non_exhaustive()
    }
}

struct Fold<T, M> {
    state: Option<T>,
    mutator: Arc<M>,
}

impl<C, T, M> TrailerAccumulator<C> for Fold<T, M>
where
    T: TrailingHeaders + Send,
    M: Fn(T, &C) -> T + Send + Sync,
{
    fn accept(&mut self, unit: &C) {
        if let Some(state) = self.state.take() {
            self.state = Some((self.mutator)(state, unit));
        }
    }

    fn finish(self: Box<Self>) -> Headers {
        self.state.map(TrailingHeaders::into_headers).unwrap_or_default()
    }
}
