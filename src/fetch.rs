//! HTTP request helper shared by every resource client

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;

/// Shape of the message an error response body may carry. The server is not
/// consistent: login failures use `error`, everything else uses `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

/// Outcome accepted for delete calls: HTTP 204 or a JSON success flag.
#[derive(Debug, Deserialize)]
struct DeleteBody {
    success: Option<bool>,
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication when a token is present
    pub fn bearer_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header("Authorization", &format!("Bearer {}", token)),
            None => self,
        }
    }

    /// Append a query parameter. Empty values are dropped; the server treats
    /// `?role=` as a filter on the empty string, not the absence of one.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.query_params.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Append a sequence of query parameters, dropping empty values.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            if !value.as_ref().is_empty() {
                self.query_params
                    .push((key.as_ref().to_string(), value.as_ref().to_string()));
            }
        }
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> Result<reqwest::RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        debug!(method = %self.method, url = %url, "sending request");

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON.
    ///
    /// Non-2xx statuses are mapped into the error taxonomy: 401 is an auth
    /// failure, 404 is not-found, anything else carries the server's own
    /// message when the body provides one.
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let req = self.build()?;
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute a delete request. Success is either HTTP 204 (no body at all)
    /// or a 2xx JSON body carrying a truthy success flag.
    pub async fn execute_delete(&self) -> Result<(), Error> {
        let req = self.build()?;
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let body = response.json::<DeleteBody>().await?;
        if body.success == Some(false) {
            warn!("delete reported failure despite 2xx status");
            return Err(Error::server(status.as_u16(), "delete failed"));
        }
        Ok(())
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> Error {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::message);

        match status {
            StatusCode::UNAUTHORIZED => {
                Error::auth(message.unwrap_or_else(|| "unauthorized".to_string()))
            }
            StatusCode::NOT_FOUND => {
                Error::not_found(message.unwrap_or_else(|| "resource not found".to_string()))
            }
            _ => Error::server(
                status.as_u16(),
                message.unwrap_or_else(|| format!("request failed with status {}", status)),
            ),
        }
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
