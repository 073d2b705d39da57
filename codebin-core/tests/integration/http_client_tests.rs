//! Integration tests for the HTTP snippet client
//!
//! Each test answers exactly one request from a local stub server and
//! checks both the request the client sent and how it read the answer.

use std::time::Duration;

use codebin_core::api::{HttpSnippetApi, SnippetApi};
use codebin_core::error::ApiError;
use codebin_core::models::{Documents, Snippet};
use secrecy::{ExposeSecret, SecretString};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Starts a server that answers one request, returning its base URL and the
/// raw request it received
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let body_len = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(base_url: &str) -> HttpSnippetApi {
    HttpSnippetApi::new(base_url, Duration::from_secs(5)).unwrap()
}

fn body_of(request: &str) -> serde_json::Value {
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn login_posts_credentials_and_reads_token() {
    let (base_url, server) = serve_once("200 OK", r#"{"token":"jwt-1"}"#).await;
    let password = SecretString::from("s3cret".to_string());

    let token = client(&base_url).login("me@example.org", &password).await.unwrap();
    assert_eq!(token.expose_secret(), "jwt-1");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/auth/login HTTP/1.1"));
    let body = body_of(&request);
    assert_eq!(body["email"], "me@example.org");
    assert_eq!(body["password"], "s3cret");
}

#[tokio::test]
async fn rejected_login_maps_status() {
    let (base_url, server) = serve_once("401 Unauthorized", r#"{"error":"bad"}"#).await;
    let password = SecretString::from("nope".to_string());

    let err = client(&base_url).login("me@example.org", &password).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            reason: "Unauthorized".to_string(),
        }
    );
    server.await.unwrap();
}

#[tokio::test]
async fn save_sends_bearer_token_and_wire_fields() {
    let (base_url, server) = serve_once("201 Created", r#"{"shareId":"k7"}"#).await;
    let token = SecretString::from("jwt-2".to_string());
    let snippet = Snippet::from_documents(
        "",
        &Documents::from_contents("<p>a</p>", "p{}", "run()"),
    );

    let share_id = client(&base_url).save_snippet(&token, &snippet).await.unwrap();
    assert_eq!(share_id, "k7");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/snippets HTTP/1.1"));
    assert!(
        request
            .lines()
            .any(|line| line.eq_ignore_ascii_case("authorization: Bearer jwt-2"))
    );
    let body = body_of(&request);
    assert_eq!(body["title"], "Untitled");
    assert_eq!(body["html"], "<p>a</p>");
    assert_eq!(body["css"], "p{}");
    assert_eq!(body["js"], "run()");
}

#[tokio::test]
async fn load_reads_shared_snippet() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"title":"Shared","html":"<i>x</i>","css":"","js":"go()","shareId":"q1"}"#,
    )
    .await;

    let snippet = client(&base_url).load_shared("q1").await.unwrap();
    assert_eq!(snippet.title, "Shared");
    assert_eq!(snippet.markup, "<i>x</i>");
    assert_eq!(snippet.style, "");
    assert_eq!(snippet.script, "go()");
    assert_eq!(snippet.share_id.as_deref(), Some("q1"));

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/snippets/share/q1 HTTP/1.1"));
}

#[tokio::test]
async fn unknown_share_maps_not_found() {
    let (base_url, server) = serve_once("404 Not Found", "{}").await;

    let err = client(&base_url).load_shared("gone").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (base_url, server) = serve_once("200 OK", "not json").await;

    let err = client(&base_url).load_shared("q2").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base_url).load_shared("q3").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
