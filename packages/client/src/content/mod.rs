//! Request content attachment
//!
//! A [`ContentSpec`] pairs an optional content source with the flush policy
//! and trailer rule used when the content is sequenced into frames. Sources
//! are factories: every attempt opens a fresh stream, so a redirect hop that
//! keeps the method can send the same content again.

pub mod trailers;

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::error::BoxError;

pub use trailers::{TrailerAccumulator, TrailerFold, TrailingHeaders};

/// Stream of content units opened for one attempt.
pub type ContentStream<C> = BoxStream<'static, Result<C, BoxError>>;

/// Re-subscribable source of content units.
pub struct ContentSource<C> {
    open: Arc<dyn Fn() -> ContentStream<C> + Send + Sync>,
}

impl<C: Send + 'static> ContentSource<C> {
    /// Creates a source that calls `open` for every attempt.
    pub fn from_fn<F, S>(open: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = Result<C, BoxError>> + Send + 'static,
    {
        Self {
            open: Arc::new(move || open().boxed()),
        }
    }

    /// Creates a source replaying a fixed list of units.
    pub fn from_units<I>(units: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Clone + Sync,
    {
        let units: Arc<[C]> = units.into_iter().collect();
        Self::from_fn(move || stream::iter(units.to_vec().into_iter().map(Ok)))
    }

    /// Creates a source of a single unit.
    pub fn once(unit: C) -> Self
    where
        C: Clone + Sync,
    {
        Self::from_units([unit])
    }

    /// Maps every unit produced by this source.
    pub fn map<D, F>(&self, f: F) -> ContentSource<D>
    where
        D: Send + 'static,
        F: Fn(C) -> D + Send + Sync + 'static,
    {
        let inner = self.clone();
        let f = Arc::new(f);
        ContentSource::from_fn(move || {
            let f = Arc::clone(&f);
            inner.open().map(move |unit| unit.map(|u| f(u)))
        })
    }

    /// Opens a fresh stream of units.
    #[must_use]
    pub fn open(&self) -> ContentStream<C> {
        (self.open)()
    }
}

impl ContentSource<Bytes> {
    /// A single UTF-8 string unit.
    pub fn from_string(content: impl Into<String>) -> Self {
        Self::once(Bytes::from(content.into()))
    }

    /// A single byte unit.
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        Self::once(content.into())
    }
}

impl<C> Clone for ContentSource<C> {
    fn clone(&self) -> Self {
        Self {
            open: Arc::clone(&self.open),
        }
    }
}

impl<C> fmt::Debug for ContentSource<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSource").finish_non_exhaustive()
    }
}

/// Decides whether a content unit marks a flush boundary.
pub struct FlushSelector<C> {
    select: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> FlushSelector<C> {
    pub fn new<F>(select: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            select: Arc::new(select),
        }
    }

    /// Flushes after every unit.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    #[inline]
    pub fn select(&self, unit: &C) -> bool {
        (self.select)(unit)
    }
}

impl<C> Clone for FlushSelector<C> {
    fn clone(&self) -> Self {
        Self {
            select: Arc::clone(&self.select),
        }
    }
}

impl<C> fmt::Debug for FlushSelector<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlushSelector").finish_non_exhaustive()
    }
}

/// Content, flush policy and trailer rule for one request.
///
/// Without a flush selector every unit is buffered until the terminal
/// frame. With a trailer rule the terminal frame carries the folded
/// trailers instead of an empty marker.
pub struct ContentSpec<C> {
    source: Option<ContentSource<C>>,
    flush_selector: Option<FlushSelector<C>>,
    trailers: Option<TrailerFold<C>>,
}

impl<C> ContentSpec<C> {
    /// No content: the request is a head followed by the terminal frame.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            source: None,
            flush_selector: None,
            trailers: None,
        }
    }

    #[must_use]
    pub fn new(source: ContentSource<C>) -> Self {
        Self {
            source: Some(source),
            flush_selector: None,
            trailers: None,
        }
    }

    #[must_use]
    pub fn with_flush_selector(mut self, selector: FlushSelector<C>) -> Self {
        self.flush_selector = Some(selector);
        self
    }

    #[must_use]
    pub fn with_trailers(mut self, fold: TrailerFold<C>) -> Self {
        self.trailers = Some(fold);
        self
    }

    #[must_use]
    pub fn source(&self) -> Option<&ContentSource<C>> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn flush_selector(&self) -> Option<&FlushSelector<C>> {
        self.flush_selector.as_ref()
    }

    #[must_use]
    pub fn trailers(&self) -> Option<&TrailerFold<C>> {
        self.trailers.as_ref()
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn has_trailers(&self) -> bool {
        self.trailers.is_some()
    }
}

impl<C> Default for ContentSpec<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> Clone for ContentSpec<C> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            flush_selector: self.flush_selector.clone(),
            trailers: self.trailers.clone(),
        }
    }
}

impl<C> fmt::Debug for ContentSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSpec")
            .field("has_content", &self.has_content())
            .field("has_flush_selector", &self.flush_selector.is_some())
            .field("has_trailers", &self.has_trailers())
            .finish()
    }
}
