/// A marker type to indicate that a connection was closed.
#[derive(Debug, thiserror::Error)]
#[error("connection closed before a response head was received")]
pub struct ConnectionClosed;

/// A marker type to indicate that an inbound message was unexpected.
#[derive(Debug, thiserror::Error)]
#[error("unexpected inbound message: {0}")]
pub struct UnexpectedMessage(pub &'static str);

/// A marker type to indicate that the read timeout elapsed.
#[derive(Debug, thiserror::Error)]
#[error("no response head within {0:?}")]
pub struct TimedOut(pub std::time::Duration);

/// A marker type for a cookie rejected by strict encoding.
#[derive(Debug, thiserror::Error)]
#[error("invalid cookie: {0}")]
pub struct InvalidCookie(pub String);
