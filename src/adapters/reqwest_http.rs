//! [`HttpClient`] backed by reqwest.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, Method};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Shares one connection pool across clones.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Every request made through the client gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body.to_owned());
        }

        let reply = request.send().await.map_err(classify)?;
        let status = reply.status().as_u16();
        let headers = header_map(reply.headers());
        // A timeout can also hit while the body is still streaming in.
        let body = reply.bytes().await.map_err(classify)?;

        Ok(Response::with_headers(status, headers, body))
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    let detail = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(detail)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(detail)
    } else if err.is_builder() {
        HttpError::InvalidUrl(detail)
    } else {
        HttpError::Other(detail)
    }
}

/// Non-UTF-8 header values are skipped.
fn header_map(map: &HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.to_string(), value.to_owned()))
        })
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::GET, url, headers, None).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::POST, url, headers, Some(body)).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::DELETE, url, headers, None).await
    }
}
