//! Request builder and response parser for the session endpoints.

use crate::client::{parse_envelope, to_json};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{LoginData, LoginParams, MeData};

/// Client for `auth/me` and `auth/login`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    base_url: String,
}

impl AuthApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_me(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, format!("{}/auth/me", self.base_url))
    }

    pub fn build_login(&self, params: &LoginParams) -> Result<HttpRequest, ApiError> {
        let body = to_json(params)?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/auth/login", self.base_url),
            body,
        ))
    }

    pub fn build_logout(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, format!("{}/auth/login", self.base_url))
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<MeData, ApiError> {
        parse_envelope(response)?.into_data()
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginData, ApiError> {
        parse_envelope(response)?.into_data()
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_envelope(response)?.into_success().map(drop)
    }
}
