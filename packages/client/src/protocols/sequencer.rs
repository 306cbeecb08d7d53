//! Lazy request frame sequencing
//!
//! [`FrameSequencer::build`] turns a descriptor and its content attachment
//! into a [`FrameSequence`]: a stream that yields the head, one frame per
//! content unit, then either the folded trailers or an empty terminal
//! frame. Nothing is produced until the transport polls, and dropping the
//! stream stops production.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::stream::{FusedStream, Stream};

use super::frames::Frame;
use crate::content::{ContentSpec, ContentStream, FlushSelector, TrailerAccumulator};
use crate::error::{self, BoxError, Result};
use crate::http::RequestDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Head,
    Content,
    Tail,
    Done,
}

pin_project_lite::pin_project! {
    /// Ordered outbound frames for one attempt.
    ///
    /// A content source error is yielded once as a write error and ends the
    /// sequence without a terminal or trailer frame.
    pub struct FrameSequence<C, S> {
        head: Option<RequestDescriptor>,
        #[pin]
        content: Option<S>,
        flush: Option<FlushSelector<C>>,
        trailers: Option<Box<dyn TrailerAccumulator<C>>>,
        phase: Phase,
    }
}

impl<C, S> FrameSequence<C, S>
where
    S: Stream<Item = std::result::Result<C, BoxError>>,
{
    pub fn new(
        descriptor: RequestDescriptor,
        content: Option<S>,
        flush: Option<FlushSelector<C>>,
        trailers: Option<Box<dyn TrailerAccumulator<C>>>,
    ) -> Self {
        Self {
            head: Some(descriptor),
            content,
            flush,
            trailers,
            phase: Phase::Head,
        }
    }
}

impl<C, S> Stream for FrameSequence<C, S>
where
    S: Stream<Item = std::result::Result<C, BoxError>>,
{
    type Item = Result<Frame<C>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match *this.phase {
                Phase::Head => {
                    *this.phase = if this.content.is_some() {
                        Phase::Content
                    } else {
                        Phase::Tail
                    };
                    if let Some(descriptor) = this.head.take() {
                        tracing::trace!(
                            target: "reqflow::sequencer",
                            method = %descriptor.method(),
                            uri = %descriptor.uri(),
                            "emitting head frame"
                        );
                        return Poll::Ready(Some(Ok(Frame::Head(descriptor))));
                    }
                }
                Phase::Content => {
                    let Some(content) = this.content.as_mut().as_pin_mut() else {
                        *this.phase = Phase::Tail;
                        continue;
                    };
                    match ready!(content.poll_next(cx)) {
                        Some(Ok(unit)) => {
                            let flush = this.flush.as_ref().is_some_and(|s| s.select(&unit));
                            if let Some(fold) = this.trailers.as_mut() {
                                fold.accept(&unit);
                            }
                            tracing::trace!(target: "reqflow::sequencer", flush, "emitting content frame");
                            return Poll::Ready(Some(Ok(Frame::Content { unit, flush })));
                        }
                        Some(Err(e)) => {
                            *this.phase = Phase::Done;
                            this.content.set(None);
                            *this.trailers = None;
                            return Poll::Ready(Some(Err(error::write(e))));
                        }
                        None => {
                            *this.phase = Phase::Tail;
                            this.content.set(None);
                        }
                    }
                }
                Phase::Tail => {
                    *this.phase = Phase::Done;
                    let frame = match this.trailers.take() {
                        Some(fold) => Frame::Trailer(fold.finish()),
                        None => Frame::Terminal,
                    };
                    tracing::trace!(target: "reqflow::sequencer", kind = frame.kind(), "emitting last frame");
                    return Poll::Ready(Some(Ok(frame)));
                }
                Phase::Done => return Poll::Ready(None),
            }
        }
    }
}

impl<C, S> FusedStream for FrameSequence<C, S>
where
    S: Stream<Item = std::result::Result<C, BoxError>>,
{
    fn is_terminated(&self) -> bool {
        self.phase == Phase::Done
    }
}

/// Builds frame sequences from request values.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSequencer;

impl FrameSequencer {
    /// Sequences `descriptor` and `content` for one attempt.
    ///
    /// The content source is opened and the trailer fold started afresh on
    /// every call, so the same [`ContentSpec`] can be sequenced once per hop.
    pub fn build<C: Send + 'static>(
        descriptor: RequestDescriptor,
        content: &ContentSpec<C>,
    ) -> FrameSequence<C, ContentStream<C>> {
        FrameSequence::new(
            descriptor,
            content.source().map(|source| source.open()),
            content.flush_selector().cloned(),
            content.trailers().map(|fold| fold.start()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::content::ContentSource;
    use futures::{StreamExt, stream};
    use http::{Method, Uri, Version};

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new(Version::HTTP_11, Method::POST, Uri::from_static("/upload"))
    }

    struct OnDrop(Arc<AtomicBool>);

    impl Drop for OnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn stops_when_dropped_mid_sequence() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicBool::new(false));
        let (counter, flag) = (pulled.clone(), released.clone());
        let source = ContentSource::from_fn(move || {
            let counter = counter.clone();
            let guard = OnDrop(flag.clone());
            stream::iter(["a", "b", "c"]).map(move |unit| {
                let _guard = &guard;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, BoxError>(unit)
            })
        });
        let mut frames = FrameSequencer::build(descriptor(), &ContentSpec::new(source));

        assert!(matches!(frames.next().await, Some(Ok(Frame::Head(_)))));
        assert!(matches!(frames.next().await, Some(Ok(Frame::Content { unit: "a", .. }))));
        assert!(!frames.is_terminated());
        drop(frames);

        assert_eq!(pulled.load(Ordering::SeqCst), 1);
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn fused_after_terminal() {
        let mut frames = FrameSequencer::build(descriptor(), &ContentSpec::<&str>::empty());
        while frames.next().await.is_some() {}
        assert!(frames.is_terminated());
        assert!(frames.next().await.is_none());
    }
}
