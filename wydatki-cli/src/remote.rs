//! HTTP client for the remote statistics service.
//!
//! Endpoints (relative to `remote.base_url`):
//!   GET    /files              GET /files/{id}       DELETE /files/{id}
//!   GET    /transactions       GET /stats/summary    GET /stats/categories
//!   GET    /stats/sources      GET /stats/top-category
//!
//! Failures are reported once as `LedgerError::Remote`; nothing is retried.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use wydatki_core::{
    CategoryTotal, FileRecord, LedgerError, PaymentSummary, Result, SourceTotal, Transaction,
    TransactionFilter,
};
use wydatki_stats::StatsProvider;

/// `/transactions` body; the service's pagination block is not needed.
#[derive(Debug, Clone, Deserialize)]
struct Paginated<T> {
    data: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct RemoteStats {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStats {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Remote(format!("build http client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "remote GET");
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| LedgerError::Remote(format!("GET {url}: {e}")))?;
        let resp = check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| LedgerError::Remote(format!("parse response from {url}: {e}")))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.endpoint(path);
        debug!(%url, "remote DELETE");
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Remote(format!("DELETE {url}: {e}")))?;
        check_status(resp).await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(LedgerError::Remote(error_message(status.as_u16(), &body)))
}

/// The service's `{"error": "..."}` text when present, else the status code.
fn error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Run a request to completion from synchronous code.
///
/// Inside the CLI's tokio runtime a nested `block_on` would panic, so the
/// current runtime is borrowed through `block_in_place`.
fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        Ok(tokio::task::block_in_place(|| handle.block_on(fut)))
    } else {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| LedgerError::Remote(format!("create tokio runtime: {e}")))?;
        Ok(rt.block_on(fut))
    }
}

impl StatsProvider for RemoteStats {
    fn files(&self) -> Result<Vec<FileRecord>> {
        block_on(self.get_json("/files", &[]))?
    }

    fn file(&self, id: &str) -> Result<Option<FileRecord>> {
        block_on(self.get_json(&format!("/files/{id}"), &[]))?.map(Some)
    }

    fn delete_file(&mut self, id: &str) -> Result<()> {
        block_on(self.delete(&format!("/files/{id}")))?
    }

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let page: Paginated<Transaction> =
            block_on(self.get_json("/transactions", &filter.query_pairs()))??;
        Ok(page.data)
    }

    fn summary(&self, filter: &TransactionFilter) -> Result<PaymentSummary> {
        block_on(self.get_json("/stats/summary", &filter.query_pairs()))?
    }

    fn category_totals(&self, filter: &TransactionFilter) -> Result<Vec<CategoryTotal>> {
        let totals: Option<Vec<CategoryTotal>> =
            block_on(self.get_json("/stats/categories", &filter.query_pairs()))??;
        Ok(totals.unwrap_or_default())
    }

    fn source_totals(&self, filter: &TransactionFilter) -> Result<Vec<SourceTotal>> {
        let totals: Option<Vec<SourceTotal>> =
            block_on(self.get_json("/stats/sources", &filter.query_pairs()))??;
        Ok(totals.unwrap_or_default())
    }

    fn top_category(&self, filter: &TransactionFilter) -> Result<Option<CategoryTotal>> {
        block_on(self.get_json("/stats/top-category", &filter.query_pairs()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response; the handle yields the request head.
    fn serve_once(status: &str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{addr}/api/"), handle)
    }

    fn remote(url: &str) -> RemoteStats {
        RemoteStats::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(404, r#"{"error":"file not found"}"#), "file not found");
        assert_eq!(error_message(500, "oops"), "HTTP 500");
        assert_eq!(error_message(502, r#"{"error":""}"#), "HTTP 502");
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let r = remote("http://localhost:8080/api/");
        assert_eq!(r.endpoint("/files"), "http://localhost:8080/api/files");
    }

    #[test]
    fn test_summary_without_cash_fields() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"totalSpent":400.5,"paidAmount":300,"unpaidAmount":100.5,"paidCount":3,"unpaidCount":1}"#,
        );
        let filter = TransactionFilter {
            exclude_categories: vec!["Dom".into()],
            is_paid: Some(true),
            ..Default::default()
        };
        let s = remote(&url).summary(&filter).unwrap();
        assert_eq!(s.total_spent, Decimal::new(4005, 1));
        assert_eq!(s.paid_count, 3);
        assert_eq!(s.cash_count, 0);

        let head = server.join().unwrap();
        assert!(head.starts_with("GET /api/stats/summary?exclude_categories=Dom&is_paid=true "));
    }

    #[test]
    fn test_transactions_page() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"data":[{"id":"t1","fileId":"f1","category":"Dom","source":"","description":"Czynsz",
                "amount":2100,"amountOriginal":"2.100,00 zł","isPaid":true,"isCash":"",
                "transactionDate":null,"createdAt":1717000000}],
               "pagination":{"page":1,"perPage":50,"totalItems":1,"totalPages":1}}"#,
        );
        let txns = remote(&url).transactions(&TransactionFilter::default()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].file_id, "f1");
        assert_eq!(txns[0].amount, Decimal::new(2100, 0));
        assert_eq!(txns[0].bank, "");
        server.join().unwrap();
    }

    #[test]
    fn test_category_totals_null_body_is_empty() {
        let (url, server) = serve_once("200 OK", "null");
        let totals = remote(&url).category_totals(&TransactionFilter::default()).unwrap();
        assert!(totals.is_empty());
        server.join().unwrap();
    }

    #[test]
    fn test_top_category_none() {
        let (url, server) = serve_once("200 OK", "null");
        let top = remote(&url).top_category(&TransactionFilter::default()).unwrap();
        assert_eq!(top, None);
        server.join().unwrap();
    }

    #[test]
    fn test_service_error_is_surfaced() {
        let (url, server) = serve_once("404 Not Found", r#"{"error":"File not found"}"#);
        let err = remote(&url).delete_file("nope").unwrap_err();
        match err {
            LedgerError::Remote(msg) => assert_eq!(msg, "File not found"),
            other => panic!("unexpected error: {other}"),
        }
        let head = server.join().unwrap();
        assert!(head.starts_with("DELETE /api/files/nope "));
    }

    #[test]
    fn test_unreachable_service_is_a_remote_error() {
        let addr = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap()
        };
        let err = remote(&format!("http://{addr}/api")).files().unwrap_err();
        assert!(matches!(err, LedgerError::Remote(_)));
    }
}
