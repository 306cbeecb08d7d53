//! Tests for request execution over the loopback transport
//!
//! Covers correlation ordering, write instrumentation, failure
//! classification, read timeouts, cancellation and response consumption.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use http::{Method, StatusCode, Version};
use reqflow_client::connect::{ControlEvent, Exchange, LoopbackProvider, Observed};
use reqflow_client::content::ContentSource;
use reqflow_client::correlation::{ContextsContainer, RandomCorrelator};
use reqflow_client::error::BoxError;
use reqflow_client::http::{Headers, RequestDescriptor, ResponseHead};
use reqflow_client::protocols::{Frame, Inbound};
use reqflow_client::telemetry::MetricsCollector;
use reqflow_client::{HttpClientRequest, RequestExecutor};

fn request(provider: &Arc<LoopbackProvider<Bytes>>, method: Method, uri: &str) -> HttpClientRequest {
    let descriptor =
        RequestDescriptor::parse(Version::HTTP_11, method, uri).expect("valid request uri");
    HttpClientRequest::new(descriptor, RequestExecutor::new(provider.clone()))
}

#[tokio::test]
async fn test_single_attempt_writes_head_content_terminal() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    let response = request(&provider, Method::POST, "/upload")
        .write_string_content("payload")
        .execute()
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.attempts(), 1);

    let attempt = provider.recorded(0).expect("one attempt");
    assert_eq!(
        attempt.timeline,
        vec![
            Observed::Frame("head"),
            Observed::Frame("content"),
            Observed::Frame("terminal"),
        ]
    );
    assert!(matches!(&attempt.frames[1], Frame::Content { unit, .. } if unit.as_ref() == b"payload"));
}

#[tokio::test]
async fn test_request_is_reusable_across_executions() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::always(Exchange::respond(StatusCode::OK)));
    let request = request(&provider, Method::PUT, "/item")
        .write_content(ContentSource::from_units(
            [b"a" as &[u8], b"b"].map(Bytes::from_static),
        ));

    request.execute().await.expect("first execution");
    request.execute().await.expect("second execution");

    let first = provider.recorded(0).expect("first attempt");
    let second = provider.recorded(1).expect("second attempt");
    assert_eq!(first.frames, second.frames);
    assert_ne!(first.connection_id, second.connection_id);
}

#[tokio::test]
async fn test_correlation_precedes_head() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    let correlator = Arc::new(RandomCorrelator::new());
    let executor = RequestExecutor::new(provider.clone()).with_correlator(correlator);
    let request = HttpClientRequest::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri"),
        executor,
    );

    let response = request.execute().await.expect("request should succeed");

    let attempt = provider.recorded(0).expect("one attempt");
    assert_eq!(attempt.timeline.first(), Some(&Observed::Control));
    assert_eq!(attempt.timeline.get(1), Some(&Observed::Frame("head")));

    let ControlEvent::NewContext(context) = &attempt.control[0];
    let attached = response
        .connection()
        .correlation
        .as_ref()
        .expect("connection carries its context");
    assert_eq!(attached.request_id, context.request_id);
}

#[tokio::test]
async fn test_correlation_context_comes_from_correlator() {
    struct FixedCorrelator;

    impl reqflow_client::correlation::RequestCorrelator for FixedCorrelator {
        fn request_id_for_attempt(
            &self,
            _request: &RequestDescriptor,
        ) -> reqflow_client::Result<String> {
            Ok("req-1".to_owned())
        }

        fn context_for_id(&self, request_id: &str) -> reqflow_client::Result<ContextsContainer> {
            Ok(ContextsContainer::new().with("parent", format!("{request_id}-parent")))
        }
    }

    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    let executor = RequestExecutor::new(provider.clone()).with_correlator(Arc::new(FixedCorrelator));
    let request = HttpClientRequest::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri"),
        executor,
    );
    request.execute().await.expect("request should succeed");

    let attempt = provider.recorded(0).expect("one attempt");
    let ControlEvent::NewContext(context) = &attempt.control[0];
    assert_eq!(context.request_id, "req-1");
    assert_eq!(context.container.get("parent"), Some("req-1-parent"));
}

#[tokio::test]
async fn test_correlator_failure_is_write_error_without_frames() {
    struct FailingCorrelator;

    impl reqflow_client::correlation::RequestCorrelator for FailingCorrelator {
        fn request_id_for_attempt(
            &self,
            _request: &RequestDescriptor,
        ) -> reqflow_client::Result<String> {
            Err(reqflow_client::error::builder("id source unavailable"))
        }

        fn context_for_id(&self, _request_id: &str) -> reqflow_client::Result<ContextsContainer> {
            Ok(ContextsContainer::new())
        }
    }

    let metrics = Arc::new(MetricsCollector::new());
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    let executor = RequestExecutor::new(provider.clone())
        .with_correlator(Arc::new(FailingCorrelator))
        .with_events(metrics.clone());
    let request = HttpClientRequest::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri"),
        executor,
    );

    let err = request.execute().await.expect_err("correlation should fail");
    assert!(err.is_write());

    let attempt = provider.recorded(0).expect("one attempt");
    assert!(attempt.frames.is_empty());
    assert_eq!(metrics.snapshot().submitted, 0);
}

#[tokio::test]
async fn test_rejected_control_channel_is_write_error() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::RejectControl]));
    let executor =
        RequestExecutor::new(provider.clone()).with_correlator(Arc::new(RandomCorrelator::new()));
    let request = HttpClientRequest::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri"),
        executor,
    );

    let err = request.execute().await.expect_err("control channel rejected");
    assert!(err.is_write());
    assert!(provider.recorded(0).expect("one attempt").frames.is_empty());
}

#[tokio::test]
async fn test_metrics_on_successful_write() {
    let metrics = Arc::new(MetricsCollector::new());
    let provider = Arc::new(
        LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]).with_events(metrics.clone()),
    );

    request(&provider, Method::POST, "/")
        .write_string_content("x")
        .execute()
        .await
        .expect("request should succeed");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.submitted, 1);
    assert_eq!(snapshot.write_complete, 1);
    assert_eq!(snapshot.write_failed, 0);
    assert_eq!(snapshot.in_flight(), 0);
}

#[tokio::test]
async fn test_metrics_on_failed_write() {
    let metrics = Arc::new(MetricsCollector::new());
    let provider =
        Arc::new(LoopbackProvider::<Bytes>::new([Exchange::FailWrite]).with_events(metrics.clone()));

    let err = request(&provider, Method::POST, "/")
        .write_string_content("x")
        .execute()
        .await
        .expect_err("write should fail");

    assert!(err.is_write());
    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.submitted, 1);
    assert_eq!(snapshot.write_complete, 0);
    assert_eq!(snapshot.write_failed, 1);
}

#[tokio::test]
async fn test_disabled_sink_receives_nothing() {
    let metrics = Arc::new(MetricsCollector::new());
    metrics.set_enabled(false);
    let provider = Arc::new(
        LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]).with_events(metrics.clone()),
    );

    request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect("request should succeed");

    assert_eq!(metrics.snapshot().submitted, 0);
    assert_eq!(metrics.snapshot().write_complete, 0);
}

#[tokio::test]
async fn test_executor_events_override_connection_sink() {
    let provider_metrics = Arc::new(MetricsCollector::new());
    let executor_metrics = Arc::new(MetricsCollector::new());
    let provider = Arc::new(
        LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)])
            .with_events(provider_metrics.clone()),
    );
    let executor = RequestExecutor::new(provider.clone()).with_events(executor_metrics.clone());
    let request = HttpClientRequest::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri"),
        executor,
    );

    request.execute().await.expect("request should succeed");

    assert_eq!(provider_metrics.snapshot().submitted, 0);
    assert_eq!(executor_metrics.snapshot().write_complete, 1);
}

#[tokio::test]
async fn test_content_source_error_truncates_write() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    let source = ContentSource::from_fn(|| {
        stream::iter(vec![
            Ok(Bytes::from_static(b"c1")),
            Err(BoxError::from("disk read failed")),
        ])
    });

    let err = request(&provider, Method::POST, "/")
        .write_content(source)
        .execute()
        .await
        .expect_err("content failure should surface");

    assert!(err.is_write());
    let attempt = provider.recorded(0).expect("one attempt");
    assert_eq!(
        attempt.timeline,
        vec![Observed::Frame("head"), Observed::Frame("content")]
    );
    assert!(attempt.write_error.is_some());
}

#[tokio::test]
async fn test_refused_connection_is_connect_error() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::RefuseConnection]));
    let err = request(&provider, Method::GET, "http://example.com/a")
        .execute()
        .await
        .expect_err("acquisition should fail");

    assert!(err.is_connect());
    assert_eq!(err.uri().map(ToString::to_string).as_deref(), Some("http://example.com/a"));
}

#[tokio::test]
async fn test_read_timeout_against_silent_peer() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::Silent]));
    let err = request(&provider, Method::GET, "/")
        .read_timeout(Duration::from_millis(50))
        .execute()
        .await
        .expect_err("silent peer should time out");

    assert!(err.is_timeout());
    assert!(provider.recorded(0).expect("one attempt").closed);
}

#[tokio::test]
async fn test_peer_closing_before_head_is_read_error() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::Respond(Vec::new())]));
    let err = request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect_err("no head should fail");

    assert!(err.is_read());
    assert!(err.is_connection_closed());
}

#[tokio::test]
async fn test_body_before_head_is_read_error() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::Respond(vec![
        Inbound::Body(Bytes::from_static(b"stray")),
    ])]));
    let err = request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect_err("body before head should fail");

    assert!(err.is_read());
}

#[tokio::test]
async fn test_second_head_is_not_a_second_response() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::Respond(vec![
        Inbound::Head(ResponseHead::new(StatusCode::OK)),
        Inbound::Head(ResponseHead::new(StatusCode::ACCEPTED)),
        Inbound::End,
    ])]));

    let mut response = request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect("first head is the response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.attempts(), 1);
    let err = response.next_chunk().await.expect_err("second head in body");
    assert!(err.is_body());
}

#[tokio::test]
async fn test_dropping_execution_closes_connection() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::always(Exchange::Silent));
    let request = request(&provider, Method::GET, "/").follow_redirects(3u32);

    let execution = request.execute();
    let outcome = tokio::time::timeout(Duration::from_millis(20), execution).await;
    assert!(outcome.is_err());

    assert_eq!(provider.attempts(), 1);
    assert!(provider.recorded(0).expect("one attempt").closed);
}

#[tokio::test]
async fn test_response_body_and_trailers() {
    let mut trailers = Headers::new();
    trailers.insert(
        http::HeaderName::from_static("x-checksum"),
        http::HeaderValue::from_static("abc"),
    );
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::Respond(vec![
        Inbound::Head(
            ResponseHead::new(StatusCode::OK)
                .with_header("content-type", "text/plain")
                .expect("valid header"),
        ),
        Inbound::Body(Bytes::from_static(b"hello ")),
        Inbound::Body(Bytes::from_static(b"world")),
        Inbound::Trailers(trailers),
        Inbound::End,
    ])]));

    let mut response = request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect("request should succeed");

    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert!(response.trailers().is_none());
    let body = response.bytes().await.expect("body should read");
    assert_eq!(body, Bytes::from_static(b"hello world"));
    assert_eq!(
        response.trailers().and_then(|t| t.get_str("x-checksum")),
        Some("abc")
    );
    assert_eq!(response.next_chunk().await.expect("finished body"), None);
}

#[tokio::test]
async fn test_response_body_stream() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond_with_body(
        StatusCode::OK,
        "streamed",
    )]));

    let response = request(&provider, Method::GET, "/")
        .execute()
        .await
        .expect("request should succeed");
    let chunks: Vec<Bytes> = response
        .into_body_stream()
        .map(|chunk| chunk.expect("chunk"))
        .collect()
        .await;

    assert_eq!(chunks, vec![Bytes::from_static(b"streamed")]);
}

#[tokio::test]
async fn test_keep_alive_and_chunked_reach_the_wire() {
    let provider = Arc::new(LoopbackProvider::<Bytes>::new([Exchange::respond(StatusCode::OK)]));
    request(&provider, Method::POST, "/")
        .set_keep_alive(false)
        .set_transfer_encoding_chunked()
        .execute()
        .await
        .expect("request should succeed");

    let attempt = provider.recorded(0).expect("one attempt");
    let Frame::Head(head) = &attempt.frames[0] else {
        panic!("first frame should be the head");
    };
    assert_eq!(head.header("connection"), Some("close"));
    assert_eq!(head.header("transfer-encoding"), Some("chunked"));
}
