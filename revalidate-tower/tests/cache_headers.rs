//! End to end tests of the cache headers a search endpoint emits through the
//! `Conditional` layer.

use std::convert::Infallible;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use http::header::{
    CACHE_CONTROL, ETAG, EXPIRES, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH,
    IF_UNMODIFIED_SINCE, LAST_MODIFIED, PRAGMA,
};
use http::{HeaderMap, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use revalidate_core::{FreshnessPolicy, SeededSource, Validator, ValidatorSource, Versioned, date};
use revalidate_tower::{Conditional, veto};
use tower::{ServiceBuilder, ServiceExt, service_fn};

struct Snapshot {
    version: u64,
    opened: DateTime<Utc>,
}

impl Versioned for Snapshot {
    fn version(&self) -> u64 {
        self.version
    }

    fn modified_at(&self) -> Option<DateTime<Utc>> {
        Some(self.opened)
    }
}

fn snapshot() -> Snapshot {
    Snapshot {
        version: 1_700_000_000_123,
        opened: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

fn body(request: &Request<()>, content: &'static str) -> Full<Bytes> {
    if request.method() == Method::HEAD {
        Full::new(Bytes::new())
    } else {
        Full::new(Bytes::from_static(content.as_bytes()))
    }
}

async fn search_handler(request: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
    let query = request.uri().query().unwrap_or_default();

    let response = match request.uri().path() {
        "/select" if query.contains("xyz_ignore_exception") => Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(CACHE_CONTROL, "max-age=30, public")
            .body(body(&request, "undefined field xyz_ignore_exception"))
            .unwrap(),
        "/select" => {
            let mut response = Response::new(body(&request, r#"{"response":{"numFound":3}}"#));
            let validator = SeededSource::new("Solr").validator(&snapshot());
            response.extensions_mut().insert(validator);
            response
        }
        "/update" if query.contains("stream.file") => {
            let mut response = Response::new(body(&request, "id\n100\n101\n102"));
            veto(&mut response);
            response
        }
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::new()))
            .unwrap(),
    };
    Ok(response)
}

async fn send(layer: &Conditional, request: Request<()>) -> (StatusCode, HeaderMap, Bytes) {
    let service = ServiceBuilder::new()
        .layer(layer.clone())
        .service(service_fn(search_handler));
    let response = service.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    (parts.status, parts.headers, bytes)
}

fn select(method: &Method) -> http::request::Builder {
    Request::builder()
        .method(method.clone())
        .uri("/select?q=solr&qt=standard")
}

fn check_body(method: &Method, status: StatusCode, body: &Bytes) {
    if method == Method::HEAD {
        assert!(body.is_empty(), "HEAD response body was not empty");
        return;
    }
    match status {
        StatusCode::OK => assert!(!body.is_empty(), "response body was empty for {method}"),
        StatusCode::NOT_MODIFIED | StatusCode::PRECONDITION_FAILED => {
            assert!(body.is_empty(), "response body was not empty for {method}")
        }
        other => panic!("unexpected status {other}"),
    }
}

async fn conditional(
    layer: &Conditional,
    method: &Method,
    header: http::HeaderName,
    value: &str,
) -> StatusCode {
    let request = select(method).header(header, value).body(()).unwrap();
    let (status, _, body) = send(layer, request).await;
    check_body(method, status, &body);
    status
}

#[tokio::test]
async fn test_cache_control() {
    let layer = Conditional::default();

    for method in [Method::GET, Method::HEAD] {
        let (status, headers, body) = send(&layer, select(&method).body(()).unwrap()).await;
        check_body(&method, status, &body);
        assert!(headers.contains_key(CACHE_CONTROL), "no Cache-Control for {method}");
        assert!(headers.contains_key(EXPIRES), "no Expires for {method}");
    }

    let (status, headers, body) = send(&layer, select(&Method::POST).body(()).unwrap()).await;
    check_body(&Method::POST, status, &body);
    assert!(!headers.contains_key(CACHE_CONTROL), "Cache-Control in response to POST");
    assert!(!headers.contains_key(EXPIRES), "Expires in response to POST");
}

#[tokio::test]
async fn test_etag() {
    let layer = Conditional::default();

    for method in [Method::GET, Method::HEAD] {
        let (status, headers, body) = send(&layer, select(&method).body(()).unwrap()).await;
        check_body(&method, status, &body);
        assert_eq!(status, StatusCode::OK);

        let etag = headers[ETAG].to_str().unwrap().to_owned();
        assert!(etag.starts_with('"') && etag.ends_with('"'), "not a valid ETag: {etag}");
        let matching = format!(r#""xyz1223", "1231323423", "1211211", {etag}"#);

        assert_eq!(
            conditional(&layer, &method, IF_NONE_MATCH, r#""xyz123456""#).await,
            StatusCode::OK
        );
        assert_eq!(
            conditional(&layer, &method, IF_NONE_MATCH, &matching).await,
            StatusCode::NOT_MODIFIED
        );
        assert_eq!(
            conditional(&layer, &method, IF_NONE_MATCH, "*").await,
            StatusCode::NOT_MODIFIED
        );

        assert_eq!(
            conditional(&layer, &method, IF_MATCH, r#""xyz123456""#).await,
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            conditional(&layer, &method, IF_MATCH, &matching).await,
            StatusCode::OK
        );
        assert_eq!(
            conditional(&layer, &method, IF_MATCH, "*").await,
            StatusCode::OK
        );
    }
}

#[tokio::test]
async fn test_not_modified_keeps_validators() {
    let layer = Conditional::default();
    let request = select(&Method::GET)
        .header(IF_NONE_MATCH, "*")
        .body(())
        .unwrap();

    let (status, headers, _) = send(&layer, request).await;

    assert_eq!(status, StatusCode::NOT_MODIFIED);
    assert!(headers.contains_key(ETAG));
    assert!(headers.contains_key(LAST_MODIFIED));
    assert!(headers.contains_key(CACHE_CONTROL));
}

#[tokio::test]
async fn test_last_modified() {
    let layer = Conditional::default();

    for method in [Method::GET, Method::HEAD] {
        let (status, headers, body) = send(&layer, select(&method).body(()).unwrap()).await;
        check_body(&method, status, &body);
        assert_eq!(status, StatusCode::OK);

        let last_modified = headers[LAST_MODIFIED].to_str().unwrap();
        let last_modified = date::parse(last_modified).expect("Last-Modified is an HTTP-date");
        assert_eq!(last_modified, snapshot().opened);

        let current = date::format(Utc::now());
        let past = date::format(last_modified - chrono::Duration::seconds(10));

        assert_eq!(
            conditional(&layer, &method, IF_MODIFIED_SINCE, &current).await,
            StatusCode::NOT_MODIFIED
        );
        assert_eq!(
            conditional(&layer, &method, IF_MODIFIED_SINCE, &past).await,
            StatusCode::OK
        );
        assert_eq!(
            conditional(&layer, &method, IF_UNMODIFIED_SINCE, &past).await,
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            conditional(&layer, &method, IF_UNMODIFIED_SINCE, &current).await,
            StatusCode::OK
        );
    }
}

#[tokio::test]
async fn test_malformed_dates_are_ignored() {
    let layer = Conditional::default();
    assert_eq!(
        conditional(&layer, &Method::GET, IF_MODIFIED_SINCE, "not a date").await,
        StatusCode::OK
    );
    assert_eq!(
        conditional(&layer, &Method::GET, IF_UNMODIFIED_SINCE, "Sun, 99 Nov 1994").await,
        StatusCode::OK
    );
}

fn check_veto_headers(headers: &HeaderMap, check_expires: bool) {
    let cache_control = headers
        .get(CACHE_CONTROL)
        .expect("no Cache-Control header")
        .to_str()
        .unwrap();
    assert!(cache_control.contains("no-cache"), "no no-cache in [{cache_control}]");
    assert!(cache_control.contains("no-store"), "no no-store in [{cache_control}]");
    assert_eq!(headers.get(PRAGMA).expect("no Pragma header"), "no-cache");
    assert!(!headers.contains_key(ETAG));
    assert!(!headers.contains_key(LAST_MODIFIED));

    if check_expires {
        let expires = headers.get(EXPIRES).expect("no Expires header");
        let expires = date::parse(expires.to_str().unwrap()).expect("Expires is an HTTP-date");
        assert!(
            Utc::now() - expires > chrono::Duration::seconds(100),
            "Expires is not far in the past"
        );
    }
}

#[tokio::test]
async fn test_cache_veto_handler() {
    let layer = Conditional::default();
    let request = Request::get("/update?stream.file=%2Ftmp%2Fcachetest.csv&stream.contentType=text%2Fcsv")
        .header(IF_NONE_MATCH, "*")
        .body(())
        .unwrap();

    let (status, headers, body) = send(&layer, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Bytes::from_static(b"id\n100\n101\n102"));
    check_veto_headers(&headers, true);
}

#[tokio::test]
async fn test_cache_veto_exception() {
    let layer = Conditional::default();
    let request = Request::get("/select?q=xyz_ignore_exception%3Asolr&qt=standard")
        .body(())
        .unwrap();

    let (status, headers, _) = send(&layer, request).await;

    assert_ne!(status, StatusCode::OK);
    check_veto_headers(&headers, false);
}

#[tokio::test]
async fn test_errors_pass_through_without_veto() {
    let layer = Conditional::builder().veto_errors(false).build();
    let request = Request::get("/select?q=xyz_ignore_exception%3Asolr")
        .header(IF_NONE_MATCH, "*")
        .body(())
        .unwrap();

    let (status, headers, body) = send(&layer, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[CACHE_CONTROL], "max-age=30, public");
    assert!(!headers.contains_key(PRAGMA));
    assert!(!body.is_empty());
}

#[tokio::test]
async fn test_never_304() {
    let layer = Conditional::builder().never_304(true).build();
    let request = select(&Method::GET)
        .header(IF_NONE_MATCH, "*")
        .header(IF_MATCH, r#""nothing""#)
        .body(())
        .unwrap();

    let (status, headers, body) = send(&layer, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
    assert!(!headers.contains_key(ETAG));
    assert!(!headers.contains_key(LAST_MODIFIED));
    assert!(headers.contains_key(CACHE_CONTROL));
}

#[tokio::test]
async fn test_policy_controls_cache_control() {
    let layer = Conditional::builder()
        .policy(FreshnessPolicy::default().max_age(Duration::from_secs(600)))
        .build();

    let before = Utc::now();
    let (_, headers, _) = send(&layer, select(&Method::GET).body(()).unwrap()).await;

    assert_eq!(headers[CACHE_CONTROL], "max-age=600, public");
    let expires = date::parse(headers[EXPIRES].to_str().unwrap()).unwrap();
    assert!(expires >= date::truncate(before) + chrono::Duration::seconds(600));
}

#[tokio::test]
async fn test_custom_validator_source() {
    let fixed = Validator::none().with_entity_tag(revalidate_core::EntityTag::new("fixed"));
    let source = move |_: &Response<Full<Bytes>>| fixed.clone();
    let layer = Conditional::builder().validators(source).build();

    let service = ServiceBuilder::new()
        .layer(layer)
        .service(service_fn(search_handler));
    let request = select(&Method::GET)
        .header(IF_NONE_MATCH, r#""fixed""#)
        .body(())
        .unwrap();
    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers()[ETAG], "\"fixed\"");
}

#[tokio::test]
async fn test_veto_expires_in_the_past_with_zero_far_past() {
    let layer = Conditional::builder()
        .policy(FreshnessPolicy::default().far_past(Duration::ZERO))
        .build();
    let request = Request::get("/update?stream.file=%2Ftmp%2Fcachetest.csv")
        .body(())
        .unwrap();

    let (_, headers, _) = send(&layer, request).await;

    let expires = date::parse(headers[EXPIRES].to_str().unwrap()).unwrap();
    assert!(expires < Utc::now());
}
