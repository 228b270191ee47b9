// Application configuration loaded from environment variables.

use anyhow::{Result, bail};
use std::path::PathBuf;
use std::str::FromStr;

/// Which live-notification surface a deployment exposes. The two families are
/// mutually exclusive; channels of the inactive family refuse to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionFamily {
    /// created/updated/deleted channels per mutation observable entity kind.
    EntityChanges,
    /// A single periodic counter channel; mutations publish nothing.
    Counter,
}

impl FromStr for SubscriptionFamily {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "changes" => Ok(Self::EntityChanges),
            "counter" => Ok(Self::Counter),
            other => bail!("unknown subscription family {other:?} (expected \"changes\" or \"counter\")"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub seed_path: PathBuf,
    pub subscriptions: SubscriptionFamily,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let subscriptions = match std::env::var("SUBSCRIPTIONS") {
            Ok(raw) => raw.parse()?,
            Err(_) => SubscriptionFamily::EntityChanges,
        };

        Ok(Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            seed_path: std::env::var("SEED_PATH")
                .unwrap_or_else(|_| "seed.json".to_string())
                .into(),
            subscriptions,
        })
    }
}
