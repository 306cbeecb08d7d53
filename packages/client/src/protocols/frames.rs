//! Outbound request frames and inbound response messages

use bytes::Bytes;

use crate::http::{Headers, RequestDescriptor, ResponseHead};

/// One unit of the outbound sequence for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<C> {
    /// Request line and headers. Always first.
    Head(RequestDescriptor),
    /// A content unit; `flush` forces it onto the wire immediately.
    Content { unit: C, flush: bool },
    /// Folded trailing headers. Ends the sequence when trailers are configured.
    Trailer(Headers),
    /// Empty end-of-content marker. Carries an implied flush.
    Terminal,
}

impl<C> Frame<C> {
    /// Whether buffered frames must be pushed to the transport after this one.
    #[must_use]
    pub fn is_flush_boundary(&self) -> bool {
        match self {
            Frame::Head(_) => false,
            Frame::Content { flush, .. } => *flush,
            Frame::Trailer(_) | Frame::Terminal => true,
        }
    }

    /// Whether this frame ends the sequence.
    #[must_use]
    pub fn is_last(&self) -> bool {
        matches!(self, Frame::Trailer(_) | Frame::Terminal)
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Head(_) => "head",
            Frame::Content { .. } => "content",
            Frame::Trailer(_) => "trailer",
            Frame::Terminal => "terminal",
        }
    }
}

/// A message read from a connection after the request was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Head(ResponseHead),
    Body(Bytes),
    Trailers(Headers),
    End,
}
