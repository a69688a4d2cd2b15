//! End-to-end tests over a loopback socket

use std::path::PathBuf;

use filebox::server::listener::serve;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn request(addr: std::net::SocketAddr, bytes: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(bytes).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_put_then_get_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let root: PathBuf = dir.path().to_path_buf();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move { serve(listener, &root).await });

    let response = request(addr, b"PUT /note.txt HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello world").await;
    assert_eq!(response, b"HTTP/1.1 201 Created\r\nContent-Length: 8\r\n\r\nCreated\n");

    let response = request(addr, b"GET /note.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response, b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\nhello world");

    let response = request(addr, b"PUT /note.txt HTTP/1.1\r\nContent-Length: 3\r\n\r\nbye").await;
    assert_eq!(response, b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nOK\n");

    let response = request(addr, b"DELETE /note.txt HTTP/1.1\r\n\r\n").await;
    assert_eq!(response, b"HTTP/1.1 501 Not Implemented\r\nContent-Length: 16\r\n\r\nNot Implemented\n");

    assert_eq!(std::fs::read(dir.path().join("note.txt")).unwrap(), b"bye");
    server.abort();
}

#[tokio::test]
async fn test_server_survives_client_hangup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("big"), vec![b'x'; 1 << 20]).unwrap();
    let root: PathBuf = dir.path().to_path_buf();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move { serve(listener, &root).await });

    {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"GET /big HTTP/1.1\r\n\r\n").await.unwrap();
        let mut first = [0u8; 16];
        stream.read_exact(&mut first).await.unwrap();
    }

    let response = request(addr, b"GET /missing HTTP/1.1\r\n\r\n").await;
    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\nContent-Length: 10\r\n\r\nNot Found\n");
    server.abort();
}
