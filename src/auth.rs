//! Auth Gate
//!
//! The secret token that guards the export endpoint, and the caller address
//! recorded when a wrong token is presented.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use rand::RngCore;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Process-wide secret, fixed at startup.
#[derive(Clone)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Uses the configured token, or generates and logs a random one.
    pub fn from_config(configured: Option<&str>) -> Self {
        match configured {
            Some(token) => {
                info!("Using SHARENV_TOKEN from environment");
                Self::new(token)
            }
            None => {
                let token = Self::generate();
                warn!(
                    "SHARENV_TOKEN not set, generated random token: {}",
                    token.expose()
                );
                token
            }
        }
    }

    /// 16 lowercase hex characters from 8 random bytes.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Exact match against the secret, compared in constant time.
    pub fn validate(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken(****)")
    }
}

/// Best guess at the caller's address: first `X-Forwarded-For` entry, then
/// `X-Real-IP`, then the socket peer.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    if let Some(real_ip) = header(headers, "x-real-ip") {
        return real_ip.to_string();
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
