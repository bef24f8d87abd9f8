//! Executes plain-data requests against the network.
//!
//! # Design
//! The API clients never perform I/O; a `Transport` turns an `HttpRequest`
//! into an `HttpResponse`. Non-2xx statuses are returned as data so the
//! parsers decide what they mean. Only a failure to obtain any response at all
//! is an `Err`, and that is what the service classifies as a network error.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::HttpMethod;

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// Adds the configured `API-KEY` header to every request and applies the
    /// configured timeout to the whole round-trip.
    pub struct UreqTransport {
        agent: ureq::Agent,
        api_key: Option<String>,
    }

    impl UreqTransport {
        pub fn new(config: &ClientConfig) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(config.timeout))
                .build()
                .new_agent();
            Self {
                agent,
                api_key: config.api_key.clone(),
            }
        }

        fn headers(&self, request: &HttpRequest) -> Vec<(String, String)> {
            let mut headers = request.headers.clone();
            if let Some(key) = &self.api_key {
                headers.push(("API-KEY".to_string(), key.clone()));
            }
            headers
        }
    }

    fn with_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    impl Transport for UreqTransport {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            debug!(method = request.method.as_str(), url = %request.url, "sending request");
            let headers = self.headers(&request);
            let url = request.url.as_str();

            let result = match (request.method, request.body.as_deref()) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(url), &headers).call(),
                (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), &headers).call(),
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Post, None) => with_headers(self.agent.post(url), &headers).send_empty(),
                (HttpMethod::Put, Some(body)) => {
                    with_headers(self.agent.put(url), &headers).send(body.as_bytes())
                }
                (HttpMethod::Put, None) => with_headers(self.agent.put(url), &headers).send_empty(),
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            debug!(status, "received response");

            Ok(HttpResponse { status, headers, body })
        }
    }
}
