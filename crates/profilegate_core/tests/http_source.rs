use profilegate_core::{CoreConfig, FetchError, HttpRecordSource, RecordSource};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

fn local_config(url: String) -> CoreConfig {
    CoreConfig {
        system_proxy: false,
        ..CoreConfig::with_records_url(url)
    }
}

/// Serves exactly one HTTP response on a random local port.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0_u8; 4096];
        let _ = stream.read(&mut buf);
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/posts")
}

#[test]
fn decodes_record_array_with_user_id_as_owner() {
    let url = serve_once(
        "HTTP/1.1 200 OK",
        r#"[{"userId":1,"id":1,"title":"Lorem ipsum","body":"x"},{"userId":2,"id":2,"title":"Dolor","body":"y"}]"#,
    );
    let source = HttpRecordSource::new(&local_config(url)).unwrap();

    let records = source.fetch_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Lorem ipsum");
    assert_eq!(records[1].owner_id, 2);
}

#[test]
fn non_success_status_is_reported() {
    let url = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
    let source = HttpRecordSource::new(&local_config(url)).unwrap();

    assert_eq!(source.fetch_records().unwrap_err(), FetchError::Status(500));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let url = serve_once("HTTP/1.1 200 OK", r#"{"not":"a list"}"#);
    let source = HttpRecordSource::new(&local_config(url)).unwrap();

    assert!(matches!(
        source.fetch_records().unwrap_err(),
        FetchError::Decode(_)
    ));
}

#[test]
fn unreachable_host_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = HttpRecordSource::new(&local_config(format!("http://{addr}/posts"))).unwrap();

    assert!(matches!(
        source.fetch_records().unwrap_err(),
        FetchError::Network(_)
    ));
}
