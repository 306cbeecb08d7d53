//! Request execution
//!
//! One execution acquires a connection, attaches correlation, writes the
//! frame sequence, and reads exactly one response head. When the redirect
//! coordinator asks for another hop the whole pass repeats on a new
//! connection. Dropping the returned future drops the connection of the
//! attempt in flight and no further hop is started.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::connect::{Connection, ConnectionProvider, FrameStream};
use crate::content::ContentSpec;
use crate::correlation::{self, RequestCorrelator};
use crate::error::{self, ConnectionClosed, Kind, Result, TimedOut, UnexpectedMessage};
use crate::http::{RequestDescriptor, Response, ResponseHead};
use crate::protocols::{FrameSequencer, Inbound};
use crate::redirect::{RedirectCoordinator, RedirectDecision, RedirectState, RedirectTargetResolver};
use crate::telemetry::HttpClientEvents;

/// Executes requests against a connection provider.
pub struct RequestExecutor<C: Send + 'static> {
    provider: Arc<dyn ConnectionProvider<C>>,
    correlator: Option<Arc<dyn RequestCorrelator>>,
    events: Option<Arc<dyn HttpClientEvents>>,
    coordinator: RedirectCoordinator,
    read_timeout: Option<Duration>,
}

impl<C: Send + 'static> RequestExecutor<C> {
    #[must_use]
    pub fn new(provider: Arc<dyn ConnectionProvider<C>>) -> Self {
        Self {
            provider,
            correlator: None,
            events: None,
            coordinator: RedirectCoordinator::default(),
            read_timeout: None,
        }
    }

    #[must_use]
    pub fn with_correlator(mut self, correlator: Arc<dyn RequestCorrelator>) -> Self {
        self.correlator = Some(correlator);
        self
    }

    /// Overrides the instrumentation sink the provider put on each connection.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn HttpClientEvents>) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn RedirectTargetResolver>) -> Self {
        self.coordinator = RedirectCoordinator::new(resolver);
        self
    }

    #[must_use]
    pub fn with_coordinator(mut self, coordinator: RedirectCoordinator) -> Self {
        self.coordinator = coordinator;
        self
    }

    /// Bounds the wait for each hop's response head.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Runs `request` to a single response, following redirects per `state`.
    pub async fn execute(
        &self,
        request: RequestDescriptor,
        content: &ContentSpec<C>,
        state: RedirectState,
    ) -> Result<Response<C>> {
        let mut request = request;
        let mut content = content.clone();
        let mut state = state;

        loop {
            let response = self.attempt(&request, &content).await?;

            let (target, next) = match self.coordinator.decide(state, &request, response.head()) {
                RedirectDecision::Deliver(reason) => {
                    tracing::debug!(
                        target: "reqflow::executor",
                        status = response.status().as_u16(),
                        ?reason,
                        "delivering response"
                    );
                    return Ok(response);
                }
                RedirectDecision::Follow { target, next } => (target, next),
            };

            let hop = self.coordinator.next_hop(&request, response.status(), target);
            tracing::debug!(
                target: "reqflow::executor",
                status = response.status().as_u16(),
                from = %request.uri(),
                to = %hop.request.uri(),
                hops_remaining = next.hops_remaining(),
                "following redirect"
            );

            let (_, mut connection) = response.into_parts();
            connection.close();

            if !hop.keep_content {
                content = ContentSpec::empty();
            }
            request = hop.request;
            state = next;
        }
    }

    async fn attempt(
        &self,
        request: &RequestDescriptor,
        content: &ContentSpec<C>,
    ) -> Result<Response<C>> {
        let mut connection = self
            .provider
            .acquire(request)
            .await
            .map_err(|e| error::reclassify(e, Kind::Connect).with_uri(request.uri().clone()))?;
        if let Some(events) = &self.events {
            connection.metadata_mut().events = Arc::clone(events);
        }
        tracing::debug!(
            target: "reqflow::executor",
            connection = connection.metadata().id,
            method = %request.method(),
            uri = %request.uri(),
            "acquired connection"
        );

        correlation::attach(connection.as_mut(), request, self.correlator.as_deref())?;
        write_instrumented(connection.as_mut(), request, content).await?;
        let head = self.read_head(connection.as_mut()).await?;

        Ok(Response::new(head, connection))
    }

    async fn read_head(&self, connection: &mut dyn Connection<C>) -> Result<ResponseHead> {
        let next = match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, connection.read())
                .await
                .map_err(|_| error::timeout(TimedOut(limit)))?,
            None => connection.read().await,
        };

        match next {
            Some(Ok(Inbound::Head(head))) => Ok(head),
            Some(Ok(_)) => Err(error::read(UnexpectedMessage("expected response head"))),
            Some(Err(e)) => Err(error::reclassify(e, Kind::Read)),
            None => Err(error::read(ConnectionClosed)),
        }
    }
}

/// Writes the frame sequence, reporting to the connection's sink.
async fn write_instrumented<C: Send + 'static>(
    connection: &mut dyn Connection<C>,
    request: &RequestDescriptor,
    content: &ContentSpec<C>,
) -> Result<()> {
    let events = Arc::clone(&connection.metadata().events);
    let started = events.publishing_enabled().then(|| {
        events.on_request_submitted();
        Instant::now()
    });

    let frames: FrameStream<C> = Box::pin(FrameSequencer::build(request.clone(), content));
    let result = connection
        .write(frames)
        .await
        .map_err(|e| error::reclassify(e, Kind::Write));

    if let Some(started) = started {
        match &result {
            Ok(()) => events.on_request_write_complete(started.elapsed()),
            Err(e) => events.on_request_write_failed(started.elapsed(), e),
        }
    }
    tracing::debug!(
        target: "reqflow::executor",
        connection = connection.metadata().id,
        ok = result.is_ok(),
        "request write finished"
    );
    result
}

impl<C: Send + 'static> Clone for RequestExecutor<C> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            correlator: self.correlator.clone(),
            events: self.events.clone(),
            coordinator: self.coordinator.clone(),
            read_timeout: self.read_timeout,
        }
    }
}

impl<C: Send + 'static> fmt::Debug for RequestExecutor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("correlator", &self.correlator.is_some())
            .field("events", &self.events.is_some())
            .field("coordinator", &self.coordinator)
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}
