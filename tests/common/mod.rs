#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use chrono::{NaiveDate, NaiveDateTime};
use projectust::models::{Priority, Project, Role, Status, User};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

pub fn project(id: u64, title: &str) -> Project {
    Project {
        id,
        title: title.into(),
        description: None,
        status: Status::Draft,
        priority: Priority::Medium,
        start_date: None,
        end_date: None,
        due_date: None,
        budget: None,
        assigned_to_id: None,
        created_at: date(2024, 1, 1),
        updated_at: None,
    }
}

pub fn user(id: u64, name: &str, is_active: bool) -> User {
    User {
        id,
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: Role::User,
        is_active,
        created_at: Some(date(2024, 1, 1)),
    }
}

/// A request captured by [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Serves one canned response per connection, in order.
pub struct MockServer {
    pub url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl MockServer {
    pub fn start(responses: Vec<(u16, &str)>) -> MockServer {
        let responses: Vec<(u16, String)> = responses.into_iter().map(|(s, b)| (s, b.to_string())).collect();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                seen.push(read_request(&mut stream));
                let reason = match status {
                    200 => "OK",
                    201 => "Created",
                    400 => "Bad Request",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            seen
        });
        MockServer { url, handle }
    }

    /// Waits for all responses to be served and returns the captured requests.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        if line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();
    RecordedRequest {
        method,
        path,
        body: String::from_utf8(body).unwrap(),
    }
}
