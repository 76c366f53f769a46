#![cfg(feature = "reqwest")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use kutti_fetch::{Downloader, Error, ReqwestClient, TransferOptions};
use kutti_verify::{checksum_file, checksum_reader};
use tempfile::tempdir;

/// Serve a single canned HTTP response on a loopback port.
fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/artifact.bin", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    (url, handle)
}

fn client() -> ReqwestClient {
    let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
    ReqwestClient::with_client(client)
}

#[test]
fn test_download_ok_matches_body() {
    let body: Vec<u8> = (0..50_000u32).map(|i| (i % 253) as u8).collect();
    let expected = checksum_reader(&body[..]).unwrap();
    let (url, server) = serve_once("200 OK", body.clone());

    let dir = tempdir().unwrap();
    let dest = dir.path().join("artifact.bin");
    let mut reports = Vec::new();
    let n = Downloader::new(client())
        .options(TransferOptions::new().chunk_size(4096).overwrite(false))
        .download_with_progress(&url, &dest, |p| reports.push(*p))
        .unwrap();
    server.join().unwrap();

    assert_eq!(n, body.len() as u64);
    assert_eq!(checksum_file(&dest).unwrap(), expected);
    assert!(reports.windows(2).all(|w| w[0].transferred <= w[1].transferred));
    assert_eq!(reports.last().map(|p| p.transferred), Some(body.len() as u64));
    assert_eq!(reports.last().and_then(|p| p.total), Some(body.len() as u64));
}

#[test]
fn test_download_404_creates_nothing() {
    let (url, server) = serve_once("404 Not Found", b"missing".to_vec());

    let dir = tempdir().unwrap();
    let dest = dir.path().join("artifact.bin");
    let err = Downloader::new(client()).download(&url, &dest, None).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, Error::Status { status: 404, .. }));
    assert!(!dest.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_download_connection_refused() {
    // Bind then drop to get a port nobody is listening on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let dir = tempdir().unwrap();
    let dest = dir.path().join("artifact.bin");

    let err = Downloader::new(client())
        .download(&format!("http://127.0.0.1:{port}/x"), &dest, None)
        .unwrap_err();

    assert!(matches!(err, Error::Request { .. }));
    assert!(!dest.exists());
}
