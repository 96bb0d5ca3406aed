use std::env;

use log::warn;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Leading hex zeros required by a valid proof.
    pub difficulty: u32,
    /// Recipient of mining rewards.
    pub node_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 5000u16);

        // LEADING_ZERO_COUNT wins over its DIFFICULTY alias.
        let (key, raw) = match lookup("LEADING_ZERO_COUNT") {
            Some(v) => ("LEADING_ZERO_COUNT", Some(v)),
            None => ("DIFFICULTY", lookup("DIFFICULTY")),
        };
        let mut difficulty = parse_or(key, raw, DEFAULT_DIFFICULTY);
        if difficulty > MAX_DIFFICULTY {
            warn!("{key}={difficulty} exceeds {MAX_DIFFICULTY}, using {DEFAULT_DIFFICULTY}");
            difficulty = DEFAULT_DIFFICULTY;
        }

        let node_id = lookup("NODE_ID")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        Self {
            host,
            port,
            difficulty,
            node_id,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("invalid {key}={v:?}, using default");
            default
        }),
    }
}
