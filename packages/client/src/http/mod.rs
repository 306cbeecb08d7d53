//! HTTP value types
//!
//! Request descriptors, the ordered header multimap, HTTP-date formatting
//! and the connection-bound response handle.

pub mod date;
pub mod headers;
pub mod request;
pub mod response;

pub use date::format_http_date;
pub use headers::{Headers, header_name, header_value};
pub use request::RequestDescriptor;
pub use response::{Response, ResponseHead};
