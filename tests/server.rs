use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use todolist::todo::{IdStrategy, TodoService, TodoStore};

async fn start() -> (SocketAddr, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = Arc::new(TodoService::new(TodoStore::seeded(IdStrategy::Sequential)));
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(todolist::run(listener, todolist::app(service), async move {
        let _ = rx.await;
    }));
    (addr, tx, handle)
}

/// One HTTP/1.1 exchange on a fresh connection; returns the raw response text.
async fn exchange(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\
         content-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default()
}

#[tokio::test]
async fn serves_the_todo_api_over_tcp() {
    let (addr, shutdown, handle) = start().await;

    let res = exchange(addr, "GET", "/todos", "").await;
    assert_eq!(status_line(&res), "HTTP/1.1 200 OK");
    assert!(res.to_ascii_lowercase().contains("content-type: application/json"));
    let json: serde_json::Value = serde_json::from_str(body(&res)).unwrap();
    assert_eq!(json["data"][0]["text"], "Learn Go");

    let res = exchange(addr, "POST", "/todos", r#"{"text":"Buy milk"}"#).await;
    assert_eq!(status_line(&res), "HTTP/1.1 201 Created");

    let res = exchange(addr, "DELETE", "/todos/3", "").await;
    assert_eq!(status_line(&res), "HTTP/1.1 204 No Content");
    assert_eq!(body(&res), "");

    let res = exchange(addr, "GET", "/todos/%31", "").await;
    assert_eq!(status_line(&res), "HTTP/1.1 200 OK");
    let json: serde_json::Value = serde_json::from_str(body(&res)).unwrap();
    assert_eq!(json["data"]["id"], 1);

    let res = exchange(addr, "GET", "/missing", "").await;
    assert_eq!(status_line(&res), "HTTP/1.1 404 Not Found");

    shutdown.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let (addr, shutdown, handle) = start().await;

    shutdown.send(()).unwrap();
    handle.await.unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}

/// Reads one response off a connection that stays open: headers, then
/// exactly `content-length` body bytes.
async fn read_one_response(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before a full response arrived");
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some((head, rest)) = text.split_once("\r\n\r\n") {
            let length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if rest.len() >= length {
                return text;
            }
        }
    }
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let (addr, shutdown, handle) = start().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /todos HTTP/1.1\r\nhost: localhost\r\n\r\n")
        .await
        .unwrap();
    let res = read_one_response(&mut stream).await;
    assert_eq!(status_line(&res), "HTTP/1.1 200 OK");

    // The client keeps the connection open and idle.
    shutdown.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(3), handle)
        .await
        .expect("server did not stop while a keep-alive connection was idle")
        .unwrap();

    let mut rest = Vec::new();
    let n = stream.read_to_end(&mut rest).await.unwrap_or(0);
    assert_eq!(n, 0);
}
