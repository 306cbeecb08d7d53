//! Request execution engine

pub mod executor;
pub mod request;

pub use executor::RequestExecutor;
pub use request::HttpClientRequest;
