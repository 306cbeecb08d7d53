use std::error::Error as StdError;

use super::helpers::{ConnectionClosed, TimedOut};
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error is from request construction.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.kind(), Kind::Builder)
    }

    /// Returns true if no connection could be acquired.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.kind(), Kind::Connect)
    }

    /// Returns true if the request frames could not be written.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self.kind(), Kind::Write)
    }

    /// Returns true if the response head could not be read.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self.kind(), Kind::Read)
    }

    /// Returns true if the error is related to the response body.
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.kind(), Kind::Body)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.kind(), Kind::Timeout) {
            return true;
        }
        self.source_chain_has::<TimedOut>()
    }

    /// Returns true if the connection closed before a response head arrived.
    #[must_use]
    pub fn is_connection_closed(&self) -> bool {
        self.source_chain_has::<ConnectionClosed>()
    }

    fn source_chain_has<T: StdError + 'static>(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<T>() {
                return true;
            }
            source = err.source();
        }

        false
    }
}
