use mindnote_core::reflection::transport::ChatMessage;
use mindnote_core::reflection::{
    CompletionRequest, CompletionResponse, CompletionTransport, ReflectionError, UreqTransport,
};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serves one canned HTTP response and hands back the request head it saw.
fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            head.push_str(&line);
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });
    (endpoint, handle)
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-3.5-turbo".to_string(),
        messages: vec![ChatMessage::system("sys"), ChatMessage::user("note")],
        max_tokens: 300,
        temperature: 0.7,
    }
}

fn send_to(
    status_line: &str,
    body: &str,
) -> (Result<CompletionResponse, ReflectionError>, String) {
    let (endpoint, server) = serve_once(status_line, body);
    let result = UreqTransport::new().send(&endpoint, "sk-local", &request());
    (result, server.join().unwrap())
}

#[test]
fn success_decodes_first_choice_and_sends_bearer_credential() {
    let (result, head) = send_to(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":" hi "}}]}"#,
    );
    assert_eq!(result.unwrap().into_text().unwrap(), "hi");
    assert!(head.starts_with("POST /v1/chat/completions"));
    assert!(head
        .lines()
        .any(|line| line.eq_ignore_ascii_case("authorization: Bearer sk-local")));
}

#[test]
fn status_401_is_invalid_credential() {
    let (result, _) = send_to("401 Unauthorized", r#"{"error":{"message":"bad key"}}"#);
    assert_eq!(result.unwrap_err(), ReflectionError::InvalidCredential);
}

#[test]
fn status_429_is_rate_limited() {
    let (result, _) = send_to("429 Too Many Requests", "{}");
    assert_eq!(result.unwrap_err(), ReflectionError::RateLimited);
}

#[test]
fn other_statuses_keep_their_code() {
    let (result, _) = send_to("500 Internal Server Error", "{}");
    assert_eq!(result.unwrap_err(), ReflectionError::Api { status: 500 });
}

#[test]
fn undecodable_body_is_malformed_response() {
    let (result, _) = send_to("200 OK", "not json");
    assert!(matches!(
        result.unwrap_err(),
        ReflectionError::MalformedResponse(_)
    ));
}

#[test]
fn closed_port_is_connectivity_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
    drop(listener);

    let error = UreqTransport::new()
        .send(&endpoint, "sk-local", &request())
        .unwrap_err();
    assert!(matches!(error, ReflectionError::Connectivity(_)));
    assert_eq!(error.code(), "connectivity");
}
