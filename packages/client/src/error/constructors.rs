use super::types::{BoxError, Error, Kind};

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a connection acquisition failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a failure while emitting request frames.
pub fn write<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Write).with(e.into())
}

/// Creates an `Error` for a failure while awaiting the response head.
pub fn read<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Read).with(e.into())
}

/// Creates an `Error` for an elapsed read timeout.
pub fn timeout<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Timeout).with(e.into())
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Ensures `e` is classified as `kind`, wrapping it if it is not.
///
/// Collaborators (providers, connections) report their own errors; the
/// executor re-classifies them by the stage they occurred in.
pub(crate) fn reclassify(e: Error, kind: Kind) -> Error {
    if e.kind() == kind {
        e
    } else {
        Error::new(kind).with(e)
    }
}
