use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub tenant_id: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.reservation-provider.example".to_string(),
            tenant_id: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct BusConfig {
    pub base_url: String,
    pub project_id: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pubsub.googleapis.com/v1".to_string(),
            project_id: String::new(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct NotifyConfig {
    pub base_url: String,
    pub channel_id: String,
    pub bot_token: String,
    pub timezone: String,
    pub dry_run: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://slack.com/api".to_string(),
            channel_id: String::new(),
            bot_token: String::new(),
            timezone: "Europe/Copenhagen".to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub db_pool_size: u32,
    pub signing_secret: String,
    pub provider: ProviderConfig,
    pub bus: BusConfig,
    pub notify: NotifyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_pool_size: 10,
            signing_secret: String::new(),
            provider: ProviderConfig::default(),
            bus: BusConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("Club.toml"))
            .merge(Env::prefixed("CLUB_APP_").split("_"))
    }

    pub fn load() -> figment::Result<Self> {
        Self::figment().extract()
    }
}
