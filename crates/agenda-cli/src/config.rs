use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the sqlite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// View shown by `agenda calendar` when no argument is given.
    #[serde(default = "default_view")]
    pub default_view: String,
    /// How far ahead open-ended repetitions are materialized.
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,
    /// Reminder poll interval for `agenda watch`, in seconds.
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
}

fn default_database_path() -> String {
    "agenda.db".to_string()
}

fn default_view() -> String {
    "month".to_string()
}

fn default_horizon_months() -> u32 {
    agenda_core::recurrence::DEFAULT_HORIZON_MONTHS
}

fn default_poll_secs() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_view: default_view(),
            horizon_months: default_horizon_months(),
            poll_secs: default_poll_secs(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("agenda.toml"))
            .merge(Env::prefixed("AGENDA_"))
            .extract()
    }
}
