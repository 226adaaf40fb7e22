// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{AiError, LlmClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    response_json_schema: &'a Value,
}

/// Posts `{prompt, response_json_schema}` to an integration endpoint and returns the JSON body.
#[derive(Debug, Clone)]
pub struct HttpLlmClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpLlmClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("flowboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| AiError::Transport(err.to_string()))?;
        Ok(Self { http, endpoint: endpoint.into(), api_key })
    }

    /// Reads the bearer token from `api_key_env`.
    pub fn from_env(endpoint: impl Into<String>, api_key_env: &str) -> Result<Self, AiError> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| AiError::MissingApiKey { var: api_key_env.to_owned() })?;
        Self::new(endpoint, Some(api_key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn invoke(&self, prompt: &str, response_schema: &Value) -> Result<Value, AiError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&InvokeRequest { prompt, response_json_schema: response_schema });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Http { status: status.as_u16(), body });
        }
        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body).map_err(AiError::Decode)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Transport("request timed out".to_owned())
    } else {
        AiError::Transport(err.to_string())
    }
}
