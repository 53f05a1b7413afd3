//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use assert_cmd::Command;
use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

/// Write a small PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(8, 8, Rgba([30, 144, 255, 255]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

/// Write a file that is not an image
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "not an image at all").expect("Failed to write garbage file");
    path
}

/// imgwarm command with HOME pointed at a temp dir and logging silenced
pub fn imgwarm(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_imgwarm"));
    cmd.env("HOME", home.path())
        .env_remove("IMGWARM_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Encoded bytes of a small PNG
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(8, 8, Rgba([255, 140, 0, 255]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes
}

/// Serve a single HTTP response on 127.0.0.1 and return a URL pointing at it.
///
/// The server thread answers the first request and then exits.
pub fn serve_once(status: &str, content_type: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read server address");
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
        let _ = stream.flush();
    });

    format!("http://{}/image.png", addr)
}

/// URL on 127.0.0.1 with nothing listening
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read server address");
    drop(listener);
    format!("http://{}/image.png", addr)
}
