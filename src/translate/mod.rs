//! Machine-translation collaborator.
//!
//! Stateless passthrough: `(text, target language code)` in, translated text
//! out. No identity coupling, no retries.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::db::config::get_env_variable;
use crate::prelude::*;

pub struct TranslateConfig {
    pub endpoint: String,
}

impl TranslateConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: get_env_variable("TRANSLATE_ENDPOINT"),
        }
    }
}

impl Display for TranslateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TranslationApi {
    pub translated_text: String,
    pub target_language: String,
}

#[derive(Debug, Serialize)]
struct BackendQuery<'a> {
    q: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct BackendReply {
    translated_text: String,
}

#[derive(Clone)]
pub struct TranslationClient {
    endpoint: String,
    client: reqwest::Client,
}

impl TranslationClient {
    pub fn new(config: &TranslateConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&BackendQuery { q: text, target })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::TranslationBackend(format!(
                "translation backend returned {}",
                response.status()
            )));
        }
        Ok(response.json::<BackendReply>().await?.translated_text)
    }
}
