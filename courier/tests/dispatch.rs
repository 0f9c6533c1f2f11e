//! End-to-end dispatch: provider, filter and the merge between them.

use courier::{
    BoxError, Client, Filtered, FilterTest, Payload, RequestError, RequestOptions, Response,
    ResponseType,
    testing::{FailingProvider, RecordingFilter, StaticProvider, TestError},
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

mod common;
use common::{JsonBodyProvider, ShoutFilter, body, named_client};

#[tokio::test]
async fn test_json_pipeline_keeps_provider_metadata() {
    let client = Client::new(JsonBodyProvider);
    let options = RequestOptions::new().with_response_type(ResponseType::Json);

    let response = client.request("http://x/data", options).await.unwrap();

    assert_eq!(response.data, Some(Payload::Json(json!({ "a": 1 }))));
    assert_eq!(response.status_code, Some(200));
    assert_eq!(response.status_text.as_deref(), Some("OK"));
    assert_eq!(response.url, "http://x/data");
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_json_pipeline_typed_access() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        a: u32,
    }

    let client = Client::new(JsonBodyProvider);
    let options = RequestOptions::new().with_response_type(ResponseType::Json);
    let response = client.get("http://x/data", &options).await.unwrap();

    assert_eq!(response.json::<Body>().unwrap(), Some(Body { a: 1 }));
}

#[tokio::test]
async fn test_without_json_response_type_body_stays_raw() {
    let client = Client::new(JsonBodyProvider);
    let response = client
        .request("http://x/data", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.data, Some(Payload::from(r#"{"a":1}"#)));
}

#[tokio::test]
async fn test_provider_error_propagates_without_filtering() {
    let client = Client::new(FailingProvider::new("connection refused"));
    let spy = RecordingFilter::new();
    client
        .filters()
        .register(Regex::new(".*").unwrap(), spy.clone(), true);

    let err = client
        .request("http://x/", RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Provider(_)));
    assert_eq!(
        err.downcast_ref::<TestError>(),
        Some(&TestError("connection refused".into()))
    );
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(spy.count(), 0, "no filter may run on provider errors");
}

#[tokio::test]
async fn test_malformed_json_rejects_with_filter_error() {
    let client = Client::new(StaticProvider::text("{oops"));
    let options = RequestOptions::new().with_response_type(ResponseType::Json);

    let err = client.request("http://x/", options).await.unwrap_err();

    assert!(matches!(err, RequestError::Filter(_)));
    assert!(err.downcast_ref::<serde_json::Error>().is_some());
}

#[tokio::test]
async fn test_failing_filter_replaces_response() {
    let client = named_client();
    client.filters().register(
        "http://x/broken",
        |_: &Response, _: &str, _: &RequestOptions| async {
            Err::<Filtered, BoxError>("filter exploded".into())
        },
        false,
    );

    let err = client
        .request("http://x/broken", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "filter exploded");

    let ok = client
        .request("http://x/fine", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(body(&ok), "default");
}

#[tokio::test]
async fn test_async_filter_output_replaces_data_only() {
    let client = named_client();
    client.filters().register("http://x/loud", ShoutFilter, false);

    let response = client
        .request("http://x/loud", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(body(&response), "DEFAULT");
    assert_eq!(response.status_code, Some(200));
    assert_eq!(response.url, "http://x/loud");
}

#[tokio::test]
async fn test_filter_test_sees_response() {
    let client = Client::new(StaticProvider::new(
        Response::default().with_status(503).with_data("busy"),
    ));
    client.filters().register(
        FilterTest::predicate(|response: &Response, _: &str, _: &RequestOptions| {
            response.status_code == Some(503)
        }),
        |_: &Response, _: &str, _: &RequestOptions| async {
            Ok::<_, BoxError>(Filtered::new(Some(Payload::from("unavailable"))))
        },
        false,
    );

    let response = client
        .request("http://x/", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(body(&response), "unavailable");
    assert_eq!(response.status_code, Some(503));
}

#[tokio::test]
async fn test_filter_can_clear_data() {
    let client = named_client();
    client.filters().register(
        "http://x/empty",
        |_: &Response, _: &str, _: &RequestOptions| async { Ok::<_, BoxError>(Filtered::default()) },
        false,
    );

    let response = client
        .request("http://x/empty", RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(response.data, None);
}

#[tokio::test]
async fn test_requests_are_independent() {
    let client = named_client();
    client.filters().register("http://x/loud", ShoutFilter, false);

    let (loud, quiet) = tokio::join!(
        client.request("http://x/loud", RequestOptions::new()),
        client.request("http://x/quiet", RequestOptions::new()),
    );

    assert_eq!(body(&loud.unwrap()), "DEFAULT");
    assert_eq!(body(&quiet.unwrap()), "default");
}
