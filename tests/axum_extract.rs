//! Purpose: End-to-end tests for the axum `StrictJson` extractor and error responses.
//! Exports: None (integration test module).
//! Role: Drive the extractor directly with in-memory requests; no sockets.
//! Invariants: Rejections render as `{error: true, message}` envelopes.

use axum::body::{Body, to_bytes};
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::IntoResponse;
use bodyjson::{Codec, DecoderConfig, Envelope, ErrorKind, StrictJson};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreateItem {
    name: String,
    qty: u32,
}

#[derive(Clone)]
struct AppState {
    codec: Codec,
}

impl FromRef<AppState> for Codec {
    fn from_ref(state: &AppState) -> Codec {
        state.codec.clone()
    }
}

fn state(max_body_bytes: u64) -> AppState {
    AppState {
        codec: Codec::new(DecoderConfig::new().with_max_body_bytes(max_body_bytes)),
    }
}

fn post(body: impl Into<Body>) -> Request {
    Request::builder()
        .method("POST")
        .uri("/items")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

#[tokio::test]
async fn extracts_typed_body() {
    let req = post(r#"{"name": "bolt", "qty": 4}"#);
    let StrictJson(item) = StrictJson::<CreateItem>::from_request(req, &state(0))
        .await
        .expect("extract");
    assert_eq!(item.name, "bolt");
    assert_eq!(item.qty, 4);
}

#[tokio::test]
async fn codec_itself_can_be_the_state() {
    let req = post("[1, 2]");
    let StrictJson(values) = StrictJson::<Vec<u8>>::from_request(req, &Codec::default())
        .await
        .expect("extract");
    assert_eq!(values, vec![1, 2]);
}

#[tokio::test]
async fn unknown_field_rejection_renders_bad_request_envelope() {
    let req = post(r#"{"name": "bolt", "qty": 4, "color": "red"}"#);
    let err = StrictJson::<CreateItem>::from_request(req, &state(0))
        .await
        .expect_err("unknown field");
    assert_eq!(err.kind(), ErrorKind::UnknownField);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let envelope: Envelope = serde_json::from_slice(&bytes).expect("envelope");
    assert!(envelope.error);
    assert_eq!(envelope.message, r#"body contains unknown key "color""#);
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn oversized_stream_is_rejected_with_413() {
    let body = format!(r#"{{"name": "{}", "qty": 1}}"#, "n".repeat(128));
    let err = StrictJson::<CreateItem>::from_request(post(body), &state(32))
        .await
        .expect_err("too large");
    assert_eq!(err.kind(), ErrorKind::BodyTooLarge);
    assert_eq!(err.message(), "body must not be larger than 32 bytes");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers().get(CONNECTION).expect("connection"),
        "close"
    );
}

#[tokio::test]
async fn declared_content_length_is_checked_before_reading() {
    let req = Request::builder()
        .method("POST")
        .uri("/items")
        .header(CONTENT_LENGTH, "4096")
        .body(Body::from(r#"{"name": "a", "qty": 1}"#))
        .expect("request");
    let err = StrictJson::<CreateItem>::from_request(req, &state(64))
        .await
        .expect_err("declared too large");
    assert_eq!(err.kind(), ErrorKind::BodyTooLarge);
}

#[tokio::test]
async fn wrong_content_type_renders_415() {
    let req = Request::builder()
        .method("POST")
        .uri("/items")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"name": "a", "qty": 1}"#))
        .expect("request");
    let err = StrictJson::<CreateItem>::from_request(req, &state(0))
        .await
        .expect_err("content type");
    assert_eq!(err.kind(), ErrorKind::InvalidContentType);
    assert_eq!(
        err.into_response().status(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
}

#[tokio::test]
async fn empty_and_trailing_bodies_are_rejected() {
    let err = StrictJson::<CreateItem>::from_request(post(Body::empty()), &state(0))
        .await
        .expect_err("empty");
    assert_eq!(err.kind(), ErrorKind::EmptyBody);

    let err = StrictJson::<CreateItem>::from_request(
        post(r#"{"name": "a", "qty": 1} {"name": "b", "qty": 2}"#),
        &state(0),
    )
    .await
    .expect_err("trailing");
    assert_eq!(err.kind(), ErrorKind::MultipleValues);
}
