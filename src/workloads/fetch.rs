//! Concurrent HTTP aggregation, one task per endpoint
//!
//! Each endpoint resolves to a [`Payload`]: either the number of records in a JSON array,
//! or a failure message. A failing endpoint is counted and reported; the others still
//! contribute to the totals.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::future::Future;
use tokio::sync::mpsc;

use crate::parallel::Tally;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("status code {0}")]
    Status(u16),

    #[error("error decoding response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Outcome of one endpoint, decided once when the response is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Number of records in the response; non-array bodies count as zero
    Records(usize),
    Failure(String),
}

impl Payload {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Payload::Records(items.len()),
            _ => Payload::Records(0),
        }
    }
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Network)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    response.json::<Value>().await.map_err(FetchError::Decode)
}

/// GET `url` and classify the response
pub async fn fetch_payload(client: reqwest::Client, url: String) -> Payload {
    match fetch_json(&client, &url).await {
        Ok(value) => Payload::from_json(&value),
        Err(e) => Payload::Failure(format!("Error from API: {e}")),
    }
}

fn absorb(tally: &mut Tally, url: &str, payload: Payload) {
    match payload {
        Payload::Records(count) => {
            tracing::info!(url, count, "data fetched");
            tally.record_success(count);
        }
        Payload::Failure(message) => {
            tracing::warn!(url, "{message}");
            tally.record_error();
        }
    }
}

/// Fetch endpoints one after another
pub async fn aggregate_sequential<F, Fut>(endpoints: &[String], fetch: F) -> Tally
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Payload>,
{
    let mut tally = Tally::default();
    for url in endpoints {
        let payload = fetch(url.clone()).await;
        absorb(&mut tally, url, payload);
    }
    tally
}

/// Fetch every endpoint in its own task and drain the results from one channel
///
/// The channel holds one slot per endpoint, so producers never wait on the consumer. The
/// drain ends when the last task drops its sender; tasks are then joined so a panicked
/// task is reported instead of silently missing from the totals.
pub async fn aggregate_parallel<F, Fut>(endpoints: &[String], fetch: F) -> Result<Tally>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Payload> + Send + 'static,
{
    let (result_tx, mut result_rx) = mpsc::channel::<(usize, Payload)>(endpoints.len().max(1));

    let handles: Vec<_> = endpoints
        .iter()
        .enumerate()
        .map(|(index, url)| {
            let result_tx = result_tx.clone();
            let request = fetch(url.clone());
            tokio::spawn(async move {
                let payload = request.await;
                // Receiver outlives every task; a failed send means the caller went away
                let _ = result_tx.send((index, payload)).await;
            })
        })
        .collect();
    drop(result_tx);

    let mut tally = Tally::default();
    while let Some((index, payload)) = result_rx.recv().await {
        absorb(&mut tally, &endpoints[index], payload);
    }

    for handle in handles {
        handle.await.context("Fetch task panicked")?;
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn endpoints() -> Vec<String> {
        vec![
            "http://test/users".to_string(),
            "http://test/broken".to_string(),
            "http://test/posts".to_string(),
        ]
    }

    async fn fake_fetch(url: String) -> Payload {
        match url.rsplit('/').next() {
            Some("users") => Payload::Records(10),
            Some("posts") => {
                // Finish after the others to scramble completion order
                tokio::time::sleep(Duration::from_millis(20)).await;
                Payload::Records(100)
            }
            _ => Payload::Failure("Error from API: status code 500".to_string()),
        }
    }

    #[tokio::test]
    async fn test_partial_failure_isolation() {
        let endpoints = endpoints();

        let sequential = aggregate_sequential(&endpoints, fake_fetch).await;
        let parallel = aggregate_parallel(&endpoints, fake_fetch).await.unwrap();

        assert_eq!(parallel.errors, 1);
        assert_eq!(parallel.successes, 110);
        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn test_no_endpoints() {
        let tally = aggregate_parallel(&[], fake_fetch).await.unwrap();
        assert_eq!(tally, Tally::default());
    }

    #[test]
    fn test_payload_from_json_shapes() {
        assert_eq!(Payload::from_json(&json!([1, 2, 3])), Payload::Records(3));
        assert_eq!(Payload::from_json(&json!({"error": "nope"})), Payload::Records(0));
        assert_eq!(Payload::from_json(&json!("text")), Payload::Records(0));
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(404).to_string(), "status code 404");
    }

    /// Serve one canned HTTP response per connection
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_fetch_payload_against_local_server() {
        let client = reqwest::Client::new();

        let ok = serve("200 OK", r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).await;
        assert_eq!(fetch_payload(client.clone(), ok).await, Payload::Records(3));

        let failing = serve("500 Internal Server Error", "{}").await;
        match fetch_payload(client.clone(), failing).await {
            Payload::Failure(message) => assert!(message.contains("500"), "{message}"),
            other => panic!("expected failure, got {other:?}"),
        }

        let garbage = serve("200 OK", "not json").await;
        match fetch_payload(client, garbage).await {
            Payload::Failure(message) => assert!(message.contains("decoding"), "{message}"),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
