use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- fixed responses ---

#[tokio::test]
async fn ok_returns_hello_with_test_header() {
    let resp = app().oneshot(get("/ok")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-test"], "1");
    assert_eq!(body_bytes(resp).await, "hello");
}

#[tokio::test]
async fn missing_returns_404_with_body() {
    let resp = app().oneshot(get("/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, "not found");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    for code in [201u16, 418, 500, 503] {
        let resp = app().oneshot(get(&format!("/status/{code}"))).await.unwrap();
        assert_eq!(resp.status().as_u16(), code);
        assert_eq!(body_bytes(resp).await, format!("status {code}"));
    }
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(get("/status/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_route_accepts_any_method() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/status/202")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
}

// --- slow ---

#[tokio::test(start_paused = true)]
async fn slow_waits_before_responding() {
    let started = tokio::time::Instant::now();
    let resp = app().oneshot(get("/slow/5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_secs(5));
    assert_eq!(body_bytes(resp).await, "slow");
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let req = Request::builder()
        .method("PUT")
        .uri("/echo")
        .header(http::header::CONTENT_TYPE, "text/plain")
        .header("X-Trace", "abc")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.headers["content-type"], "text/plain");
    assert_eq!(echo.headers["x-trace"], "abc");
    assert_eq!(echo.body, "payload");
}

#[tokio::test]
async fn echo_with_no_body_reports_empty_string() {
    let resp = app().oneshot(get("/echo")).await.unwrap();
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.body, "");
}

// --- headers and bytes ---

#[tokio::test]
async fn multi_sends_repeated_set_cookie() {
    let resp = app().oneshot(get("/multi")).await.unwrap();

    let cookies: Vec<_> = resp
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

#[tokio::test]
async fn bytes_body_is_not_utf8() {
    let resp = app().oneshot(get("/bytes")).await.unwrap();
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], &[b'f', b'o', 0xff]);
    assert!(std::str::from_utf8(&body).is_err());
}
