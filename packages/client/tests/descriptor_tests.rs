//! Tests for request descriptor value semantics under sharing

use std::sync::Arc;

use http::{Method, Version};
use reqflow_client::http::RequestDescriptor;

#[tokio::test]
async fn test_concurrent_derivations_are_isolated() {
    let base = Arc::new(
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "http://example.com/")
            .expect("valid uri")
            .add_header("accept", "*/*")
            .expect("valid header"),
    );

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let base = Arc::clone(&base);
            tokio::spawn(async move {
                base.add_header("x-task", n.to_string())
                    .expect("valid header")
                    .set_method(Method::POST)
            })
        })
        .collect();

    for (n, task) in tasks.into_iter().enumerate() {
        let derived = task.await.expect("task should not panic");
        assert_eq!(derived.header("x-task"), Some(n.to_string().as_str()));
        assert_eq!(derived.method(), Method::POST);
        assert_eq!(derived.header("accept"), Some("*/*"));
    }

    assert_eq!(base.method(), Method::GET);
    assert!(!base.contains_header("x-task"));
    assert_eq!(base.headers().len(), 1);
}

#[test]
fn test_header_order_is_insertion_order() {
    let descriptor = RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/")
        .expect("valid uri")
        .add_header("b-first", "1")
        .expect("valid header")
        .add_header("a-second", "2")
        .expect("valid header")
        .add_header("b-first", "3")
        .expect("valid header");

    let names: Vec<&str> = descriptor.header_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["b-first", "a-second"]);
    let values: Vec<&str> = descriptor
        .all_headers("b-first")
        .iter()
        .map(|v| v.to_str().expect("ascii value"))
        .collect();
    assert_eq!(values, vec!["1", "3"]);
}

#[test]
fn test_invalid_header_is_rejected_without_side_effects() {
    let descriptor =
        RequestDescriptor::parse(Version::HTTP_11, Method::GET, "/").expect("valid uri");

    let err = descriptor
        .add_header("bad header", "value")
        .expect_err("space is not a token character");
    assert!(err.is_builder());
    assert!(descriptor.headers().is_empty());
}
