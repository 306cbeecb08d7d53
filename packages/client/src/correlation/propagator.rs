//! Stamping connections with correlation context

use super::context::CorrelationContext;
use super::correlator::RequestCorrelator;
use crate::connect::{Connection, ControlEvent};
use crate::error::{self, Kind, Result};
use crate::http::RequestDescriptor;

/// Attaches a fresh correlation context to `connection` for one attempt.
///
/// Without a correlator this does nothing and returns `None`. Otherwise the
/// context is fired on the control channel, before any frame is written,
/// and recorded in the connection metadata. Any failure is a write error.
pub fn attach<C: Send + 'static>(
    connection: &mut dyn Connection<C>,
    request: &RequestDescriptor,
    correlator: Option<&dyn RequestCorrelator>,
) -> Result<Option<CorrelationContext>> {
    let Some(correlator) = correlator else {
        return Ok(None);
    };

    let request_id = correlator
        .request_id_for_attempt(request)
        .map_err(|e| error::reclassify(e, Kind::Write))?;
    let container = correlator
        .context_for_id(&request_id)
        .map_err(|e| error::reclassify(e, Kind::Write))?;
    let context = CorrelationContext {
        request_id,
        container,
    };

    connection
        .fire_event(ControlEvent::NewContext(context.clone()))
        .map_err(|e| error::reclassify(e, Kind::Write))?;
    connection.metadata_mut().correlation = Some(context.clone());

    tracing::debug!(
        target: "reqflow::correlation",
        connection = connection.metadata().id,
        request_id = %context.request_id,
        "attached correlation context"
    );
    Ok(Some(context))
}
