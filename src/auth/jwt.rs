//! JWT signing and verification keys.
//!
//! Keys are built once at startup from [`TokenConfig`] and handed to the
//! router state, so there is no process-global key material. Verification
//! tries every accepted secret in turn: rotating the signing secret means
//! moving the old one into the fallback list, which keeps outstanding tokens
//! valid until they expire.

use std::fmt::Display;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::db::config::get_env_variable;
use crate::prelude::*;

const ALGORITHM: Algorithm = Algorithm::HS256;

pub struct TokenConfig {
    pub secret: String,
    pub fallback_secrets: Vec<String>,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        let fallback_secrets = std::env::var("JWT_SECRET_FALLBACKS")
            .map(|secrets| {
                secrets
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            secret: get_env_variable("JWT_SECRET"),
            fallback_secrets,
        }
    }
}

impl Display for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

/// Encoding key for the current signing secret plus decoding keys for every
/// secret still accepted during verification.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: Vec<DecodingKey>,
}

impl TokenKeys {
    pub fn new(config: &TokenConfig) -> Self {
        let mut decoding = vec![DecodingKey::from_secret(config.secret.as_bytes())];
        decoding.extend(
            config
                .fallback_secrets
                .iter()
                .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
        );

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding,
        }
    }

    pub fn jwt_encode<T>(&self, body: &T) -> Result<String>
    where
        T: Serialize,
    {
        let header = Header::new(ALGORITHM);
        Ok(encode(&header, body, &self.encoding)?)
    }

    /// Expiry is checked by the caller against an explicit instant, so `exp`
    /// validation is disabled here. The claim itself stays required.
    pub fn jwt_decode<T>(&self, token: &str) -> Result<TokenData<T>>
    where
        T: DeserializeOwned,
    {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;

        let mut last_error = None;
        for key in &self.decoding {
            match decode(token, key, &validation) {
                Ok(data) => return Ok(data),
                Err(err) => last_error = Some(err),
            }
        }
        Err(last_error
            .map(Error::JWT)
            .unwrap_or(Error::AuthInvalidToken))
    }
}
