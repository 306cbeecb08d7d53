//! Reqflow Prelude
//!
//! This module contains the essential types that end users need for HTTP operations.
//! Only canonical types that are part of the public API belong here.

// Request and response values
pub use crate::http::{Headers, RequestDescriptor, Response, ResponseHead};

// Error types
pub use crate::error::{Error, Kind, Result};

// Executable requests
pub use crate::client::{HttpClientRequest, RequestExecutor};
pub use crate::config::{ClientConfig, Validator};

// Content attachment
pub use crate::content::{ContentSource, ContentSpec, FlushSelector, TrailerFold, TrailingHeaders};

// Collaborators
pub use crate::connect::{Connection, ConnectionMetadata, ConnectionProvider, ControlEvent};
pub use crate::correlation::{ContextsContainer, CorrelationContext, RequestCorrelator};
pub use crate::redirect::{DEFAULT_MAX_REDIRECTS, NO_REDIRECTS, RedirectLimit, RedirectTargetResolver};
pub use crate::telemetry::{HttpClientEvents, MetricsCollector, NoopEvents};

// Frames
pub use crate::protocols::{Frame, FrameSequencer, Inbound};

// HTTP standard types from http crate
pub use ::http::{HeaderName, HeaderValue, Method, StatusCode, Uri, Version};
