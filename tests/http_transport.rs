use oneshot_chat::{ChatClient, DeepSeekProvider, Error, HttpTransport, Transport};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accepts one connection, captures the raw request and answers with `body`.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/chat/completions", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    });

    (url, handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(split) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..split]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    raw.len() >= split + 4 + content_length
}

#[tokio::test]
async fn posts_json_with_bearer_header() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#,
    )
    .await;

    let provider = DeepSeekProvider::new("sk-live".to_string()).with_endpoint(url);
    let client = ChatClient::new(provider);

    assert_eq!(client.ask("hi").await.unwrap(), "Hello");

    let request = server.await.unwrap();
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST /chat/completions HTTP/1.1"));
    assert!(lower.contains("authorization: bearer sk-live"));
    assert!(lower.contains("content-type: application/json"));

    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["stream"], json!(false));
    assert_eq!(body["messages"], json!([{"role": "user", "content": "hi"}]));
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let (url, server) = serve_once("HTTP/1.1 402 Payment Required", r#"{"error":"Insufficient Balance"}"#).await;

    let client = ChatClient::new(DeepSeekProvider::new("k".to_string()).with_endpoint(url));

    match client.ask("hi").await {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 402);
            assert_eq!(body, r#"{"error":"Insufficient Balance"}"#);
        }
        other => panic!("expected status error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new();
    let err = transport
        .post_json(&format!("http://{}/chat", addr), "k", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.render("请求出错: ").starts_with("请求出错: network error: "));
}
