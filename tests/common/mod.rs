#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// How the fake catalog answers one connection.
pub enum Reply {
    Json(&'static str, String),
    /// Accept and hold the connection without answering.
    Hang(Duration),
}

fn read_request_line(stream: TcpStream) -> (TcpStream, String) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    (reader.into_inner(), request_line)
}

fn write_json_response(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
}

/// Serves `replies` in order, one per connection, and returns the request
/// lines it saw once every reply has been sent. Each connection is answered
/// on its own thread so a hanging reply does not hold up the next one.
pub fn serve(replies: Vec<Reply>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/surah", listener.local_addr().unwrap());
    let server = thread::spawn(move || {
        let mut handlers = Vec::new();
        for reply in replies {
            let (stream, _) = listener.accept().unwrap();
            handlers.push(thread::spawn(move || {
                let (mut stream, request_line) = read_request_line(stream);
                match reply {
                    Reply::Json(status, body) => write_json_response(&mut stream, status, &body),
                    Reply::Hang(duration) => thread::sleep(duration),
                }
                request_line
            }));
        }
        handlers
            .into_iter()
            .map(|handler| handler.join().unwrap())
            .collect()
    });
    (base, server)
}

/// A catalog envelope for `number` with `verses` verses.
pub fn chapter_body(number: u32, verses: usize) -> String {
    let verses: Vec<String> = (1..=verses)
        .map(|n| {
            format!(
                r#"{{ "number": {{ "inSurah": {n} }}, "text": {{ "arab": "arab {n}", "transliteration": {{ "en": "latin {n}" }} }} }}"#
            )
        })
        .collect();
    format!(
        r#"{{
          "code": 200,
          "status": "OK.",
          "message": "Success fetching surah.",
          "data": {{
            "number": {number},
            "numberOfVerses": {count},
            "name": {{
              "short": "short {number}",
              "long": "long {number}",
              "translation": {{ "en": "english {number}", "id": "indonesian {number}" }},
              "transliteration": {{ "en": "Surah-{number}", "id": "Surah {number}" }}
            }},
            "verses": [{verses}]
          }}
        }}"#,
        count = verses.len(),
        verses = verses.join(",")
    )
}
