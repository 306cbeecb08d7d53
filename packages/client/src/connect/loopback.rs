//! In-memory transport
//!
//! [`LoopbackProvider`] hands out connections that record every control
//! event and frame written to them, then replay a scripted response. Each
//! acquisition consumes the next [`Exchange`] from the script.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use futures::StreamExt;
use futures::future::{self, BoxFuture};
use http::StatusCode;

use super::types::{
    Connection, ConnectionMetadata, ConnectionProvider, ControlEvent, FrameStream,
    next_connection_id,
};
use crate::error::{self, ConnectionClosed, Result};
use crate::http::{RequestDescriptor, ResponseHead};
use crate::protocols::{Frame, Inbound};
use crate::telemetry::HttpClientEvents;

/// What the peer does on one connection.
#[derive(Debug, Clone)]
pub enum Exchange {
    /// Accept the request, then yield these messages in order.
    Respond(Vec<Inbound>),
    /// Fail acquisition.
    RefuseConnection,
    /// Reject the control channel.
    RejectControl,
    /// Fail the write on its first frame.
    FailWrite,
    /// Accept the request and never answer.
    Silent,
}

impl Exchange {
    /// A bodiless response with `status`.
    #[must_use]
    pub fn respond(status: StatusCode) -> Self {
        Exchange::Respond(vec![Inbound::Head(ResponseHead::new(status)), Inbound::End])
    }

    /// A response with `status` and `body`.
    #[must_use]
    pub fn respond_with_body(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Exchange::Respond(vec![
            Inbound::Head(ResponseHead::new(status)),
            Inbound::Body(body.into()),
            Inbound::End,
        ])
    }

    /// A redirect-class response pointing at `location`.
    #[must_use]
    pub fn redirect(status: StatusCode, location: &str) -> Self {
        let mut head = ResponseHead::new(status);
        if let Ok(value) = http::HeaderValue::from_str(location) {
            head.headers.append(http::header::LOCATION, value);
        }
        Exchange::Respond(vec![Inbound::Head(head), Inbound::End])
    }
}

/// Something observed on a connection, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    Control,
    Frame(&'static str),
}

/// Everything one acquisition saw.
#[derive(Debug, Clone)]
pub struct RecordedAttempt<C> {
    pub target: RequestDescriptor,
    pub connection_id: Option<u64>,
    pub control: Vec<ControlEvent>,
    pub frames: Vec<Frame<C>>,
    pub timeline: Vec<Observed>,
    pub write_error: Option<String>,
    pub closed: bool,
}

impl<C> RecordedAttempt<C> {
    fn new(target: RequestDescriptor, connection_id: Option<u64>) -> Self {
        Self {
            target,
            connection_id,
            control: Vec::new(),
            frames: Vec::new(),
            timeline: Vec::new(),
            write_error: None,
            closed: false,
        }
    }
}

type Records<C> = Arc<Mutex<Vec<RecordedAttempt<C>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted in-memory connection provider.
pub struct LoopbackProvider<C = Bytes> {
    script: Mutex<VecDeque<Exchange>>,
    repeat_last: bool,
    records: Records<C>,
    events: Option<Arc<dyn HttpClientEvents>>,
}

impl<C: Send + 'static> LoopbackProvider<C> {
    /// Serves `exchanges` in order, one per acquisition. Acquisitions past
    /// the end of the script are refused.
    pub fn new<I: IntoIterator<Item = Exchange>>(exchanges: I) -> Self {
        Self {
            script: Mutex::new(exchanges.into_iter().collect()),
            repeat_last: false,
            records: Arc::new(Mutex::new(Vec::new())),
            events: None,
        }
    }

    /// Serves `exchange` for every acquisition.
    #[must_use]
    pub fn always(exchange: Exchange) -> Self {
        let mut provider = Self::new([exchange]);
        provider.repeat_last = true;
        provider
    }

    /// Installs `events` as the instrumentation sink of every connection.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn HttpClientEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// Number of acquisitions so far, refused ones included.
    #[must_use]
    pub fn attempts(&self) -> usize {
        lock(&self.records).len()
    }

    /// Targets of every acquisition, in order.
    #[must_use]
    pub fn targets(&self) -> Vec<RequestDescriptor> {
        lock(&self.records).iter().map(|r| r.target.clone()).collect()
    }

    /// Snapshot of the `index`-th acquisition.
    #[must_use]
    pub fn recorded(&self, index: usize) -> Option<RecordedAttempt<C>>
    where
        C: Clone,
    {
        lock(&self.records).get(index).cloned()
    }

    fn next_exchange(&self) -> Option<Exchange> {
        let mut script = lock(&self.script);
        if self.repeat_last && script.len() == 1 {
            return script.front().cloned();
        }
        script.pop_front()
    }
}

impl<C: Send + 'static> ConnectionProvider<C> for LoopbackProvider<C> {
    fn acquire<'a>(
        &'a self,
        target: &'a RequestDescriptor,
    ) -> BoxFuture<'a, Result<Box<dyn Connection<C>>>> {
        let exchange = self.next_exchange();
        let result = match exchange {
            None | Some(Exchange::RefuseConnection) => {
                lock(&self.records).push(RecordedAttempt::new(target.clone(), None));
                Err(error::connect(ConnectionClosed))
            }
            Some(exchange) => {
                let id = next_connection_id();
                let index = {
                    let mut records = lock(&self.records);
                    records.push(RecordedAttempt::new(target.clone(), Some(id)));
                    records.len() - 1
                };
                let mut metadata = ConnectionMetadata::new(id);
                if let Some(events) = &self.events {
                    metadata = metadata.with_events(Arc::clone(events));
                }
                let connection: Box<dyn Connection<C>> = Box::new(LoopbackConnection {
                    metadata,
                    index,
                    exchange,
                    records: Arc::clone(&self.records),
                    closed: false,
                });
                Ok(connection)
            }
        };
        Box::pin(future::ready(result))
    }
}

/// Connection handed out by [`LoopbackProvider`].
pub struct LoopbackConnection<C> {
    metadata: ConnectionMetadata,
    index: usize,
    exchange: Exchange,
    records: Records<C>,
    closed: bool,
}

impl<C> LoopbackConnection<C> {
    fn record(&self, apply: impl FnOnce(&mut RecordedAttempt<C>)) {
        if let Some(record) = lock(&self.records).get_mut(self.index) {
            apply(record);
        }
    }
}

impl<C: Send + 'static> Connection<C> for LoopbackConnection<C> {
    fn metadata(&self) -> &ConnectionMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ConnectionMetadata {
        &mut self.metadata
    }

    fn fire_event(&mut self, event: ControlEvent) -> Result<()> {
        if matches!(self.exchange, Exchange::RejectControl) {
            return Err(error::write(ConnectionClosed));
        }
        self.record(|r| {
            r.control.push(event);
            r.timeline.push(Observed::Control);
        });
        Ok(())
    }

    fn write(&mut self, mut frames: FrameStream<C>) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            while let Some(frame) = frames.next().await {
                if matches!(self.exchange, Exchange::FailWrite) {
                    self.record(|r| r.write_error = Some("connection reset".to_owned()));
                    return Err(error::write(ConnectionClosed));
                }
                match frame {
                    Ok(frame) => {
                        let last = frame.is_last();
                        self.record(|r| {
                            r.timeline.push(Observed::Frame(frame.kind()));
                            r.frames.push(frame);
                        });
                        if last {
                            break;
                        }
                    }
                    Err(e) => {
                        self.record(|r| r.write_error = Some(e.to_string()));
                        return Err(e);
                    }
                }
            }
            Ok(())
        })
    }

    fn read(&mut self) -> BoxFuture<'_, Option<Result<Inbound>>> {
        if self.closed {
            return Box::pin(future::ready(None));
        }
        match &mut self.exchange {
            Exchange::Respond(messages) if !messages.is_empty() => {
                let message = messages.remove(0);
                Box::pin(future::ready(Some(Ok(message))))
            }
            Exchange::Silent => Box::pin(future::pending::<Option<Result<Inbound>>>()),
            _ => Box::pin(future::ready(None)),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.record(|r| r.closed = true);
        }
    }
}

impl<C> Drop for LoopbackConnection<C> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            self.record(|r| r.closed = true);
        }
    }
}
