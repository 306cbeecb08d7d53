pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{ConnectionClosed, InvalidCookie, TimedOut, UnexpectedMessage};
pub use types::{Error, Kind, Result};

pub use types::BoxError;
