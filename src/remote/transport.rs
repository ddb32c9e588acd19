use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TableError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, String)], timeout: Duration) -> Result<HttpResponse>;
}

/// `url?k=v&...` as it will be requested; used in error messages.
pub fn display_url(url: &str, query: &[(&str, String)]) -> String {
    match reqwest::Url::parse_with_params(url, query.iter().map(|(k, v)| (*k, v.as_str()))) {
        Ok(full) => full.to_string(),
        Err(_) => url.to_string(),
    }
}

/// reqwest-backed transport; one client reused for every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TableError::Transport { url: String::new(), source: e })?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxy, TLS, default headers).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)], timeout: Duration) -> Result<HttpResponse> {
        let full_url = display_url(url, query);
        debug!(url = %full_url, ?timeout, "GET");
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                TableError::Timeout { url: full_url.clone(), timeout }
            } else {
                TableError::Transport { url: full_url.clone(), source: e }
            }
        };
        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .map_err(classify)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(classify)?;
        debug!(url = %full_url, status, bytes = body.len(), "response");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// In-memory transport answering by base URL; counts requests.
    #[derive(Debug, Default)]
    pub(crate) struct CannedTransport {
        responses: HashMap<String, HttpResponse>,
        timeout_urls: Vec<String>,
        pub(crate) calls: Arc<AtomicUsize>,
        pub(crate) last_query: std::sync::Mutex<Vec<(String, String)>>,
    }

    impl CannedTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), HttpResponse { status, body: body.to_string() });
            self
        }

        pub(crate) fn timing_out(mut self, url: &str) -> Self {
            self.timeout_urls.push(url.to_string());
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for CannedTransport {
        fn get(&self, url: &str, query: &[(&str, String)], timeout: Duration) -> Result<HttpResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() =
                query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
            if self.timeout_urls.iter().any(|u| u == url) {
                return Err(TableError::Timeout { url: display_url(url, query), timeout });
            }
            Ok(self
                .responses
                .get(url)
                .cloned()
                .unwrap_or(HttpResponse { status: 404, body: String::new() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::error::ErrorKind;

    fn local_transport() -> HttpTransport {
        let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        HttpTransport::with_client(client)
    }

    /// Accept one connection, optionally write `reply`, then hold it open.
    fn stalling_server(reply: Option<&'static str>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/showcodon.cgi", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            if let Some(reply) = reply {
                stream.write_all(reply.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            thread::sleep(Duration::from_secs(2));
        });
        (url, handle)
    }

    #[test]
    fn silent_server_is_a_timeout() {
        let (url, server) = stalling_server(None);
        let timeout = Duration::from_millis(300);
        let err = local_transport()
            .get(&url, &[("species", "316407".to_string())], timeout)
            .unwrap_err();
        assert!(
            matches!(err, TableError::Timeout { timeout: t, ref url } if t == timeout && url.contains("species=316407")),
            "{:?}",
            err
        );
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("timed out after 300ms"));
        server.join().unwrap();
    }

    #[test]
    fn stalled_body_is_a_timeout() {
        let (url, server) =
            stalling_server(Some("HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nUUU F 0.57"));
        let timeout = Duration::from_millis(300);
        let err = local_transport().get(&url, &[], timeout).unwrap_err();
        assert!(matches!(err, TableError::Timeout { .. }), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::Transport);
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_not_a_timeout() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let url = format!("http://{}/", addr);
        let err = local_transport().get(&url, &[], Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, TableError::Transport { .. }), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn display_url_encodes_query() {
        let url = display_url(
            "https://example.org/cgi",
            &[("taxid", "9606".to_string()), ("filterIn", "[\"genomic\"]".to_string())],
        );
        assert!(url.starts_with("https://example.org/cgi?taxid=9606&filterIn="));
        assert!(!url.contains('"'));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 404, body: String::new() }.is_success());
    }
}
