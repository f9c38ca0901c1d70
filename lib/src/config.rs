use serde::Deserialize;

use crate::transport::relay::{Relay, RelayKind};

pub const DEFAULT_PATH: &str = "/etc/formpost/formpost.toml";
const ENV_PREFIX: &str = "FORMPOST_";

/// Submission configuration.
///
/// The mail endpoint, the destination addresses, and the SMTP account the
/// endpoint should use are all deliberately external: none of them have
/// in-source defaults. The relay list defaults to the public proxies but
/// can be overridden per deployment.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub endpoint: String,

    #[serde(default = "default_relays")]
    pub relays: Vec<Relay>,

    pub from: String,
    pub to: String,

    pub smtp_server: String,
    pub smtp_port: String,
    pub smtp_username: String,
    pub smtp_password: String,
}

fn default_relays() -> Vec<Relay> {
    vec![
        Relay {
            name: "allorigins".to_string(),
            base: "https://api.allorigins.win/raw".to_string(),
            kind: RelayKind::QueryParam,
        },
        Relay {
            name: "corsproxy".to_string(),
            base: "https://corsproxy.io/".to_string(),
            kind: RelayKind::BareQuery,
        },
        Relay {
            name: "yacdn".to_string(),
            base: "https://yacdn.org/proxy/".to_string(),
            kind: RelayKind::PathSuffix,
        },
    ]
}

/// Loads formpost config from filesystem and merges it with any
/// environment variables prefixed with FORMPOST_.
///
/// This function will panic on error.
///
/// See `formpost.sample.toml` in the repository root for valid keys.
pub fn load_config(path: Option<&str>) -> Config {
    let mut settings = config::Config::default();

    settings
        .merge(config::File::with_name(path.unwrap_or(DEFAULT_PATH)))
        .unwrap()
        .merge(config::Environment::with_prefix(ENV_PREFIX))
        .unwrap();

    settings.try_into::<Config>().unwrap()
}
