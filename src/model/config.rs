use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::menu::PlayType;
use crate::utils::file_utils;

pub const DEFAULT_USER_AGENT: &str = "okhttp/4.9.3";

fn default_as_true() -> bool { true }

fn default_auth_url() -> String { String::from("https://auth.kayosports.com.au/api/v2") }

fn default_content_url() -> String { String::from("https://vccapi.kayosports.com.au/content") }

fn default_play_url() -> String { String::from("https://vmndplay.kayosports.com.au/api/v1") }

fn default_profile_url() -> String { String::from("https://profileapi.kayosports.com.au") }

fn default_image_url() -> String { String::from("https://vmndims.kayosports.com.au/api/v2/img") }

fn default_resource_url() -> String { String::from("https://resources.kayosports.com.au/production") }

fn default_provider() -> String { String::from("AKAMAI") }

fn default_service_interval() -> u64 { 300 }

// "started more than 10 minutes ago" cut-off for pending alerts. The value is
// inherited; keep it configurable instead of guessing at a rationale.
fn default_alert_grace() -> u64 { 600 }

fn default_channels_panel() -> String { String::from("yJbvNNbmxlD6") }

fn default_plugin_id() -> String { String::from("plugin.video.sportcast") }

fn default_userdata_file() -> String { String::from("userdata.json") }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigApi {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_content_url")]
    pub content_url: String,
    #[serde(default = "default_play_url")]
    pub play_url: String,
    #[serde(default = "default_profile_url")]
    pub profile_url: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default = "default_resource_url")]
    pub resource_url: String,
}

impl Default for ConfigApi {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            content_url: default_content_url(),
            play_url: default_play_url(),
            profile_url: default_profile_url(),
            image_url: default_image_url(),
            resource_url: default_resource_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub working_dir: String,
    #[serde(default)]
    pub api: ConfigApi,
    #[serde(default = "default_provider")]
    pub preferred_provider: String,
    #[serde(default)]
    pub live_play_type: PlayType,
    #[serde(default = "default_as_true")]
    pub show_hero_contents: bool,
    #[serde(default = "default_service_interval")]
    pub service_interval_secs: u64,
    #[serde(default = "default_alert_grace")]
    pub alert_grace_secs: u64,
    #[serde(default = "default_channels_panel")]
    pub channels_panel_id: String,
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,
    #[serde(default = "default_userdata_file")]
    pub userdata_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: String::new(),
            api: ConfigApi::default(),
            preferred_provider: default_provider(),
            live_play_type: PlayType::default(),
            show_hero_contents: true,
            service_interval_secs: default_service_interval(),
            alert_grace_secs: default_alert_grace(),
            channels_panel_id: default_channels_panel(),
            plugin_id: default_plugin_id(),
            userdata_file: default_userdata_file(),
        }
    }
}

impl Config {
    /// Reads the yaml config, falling back to full defaults when the file is
    /// missing so a fresh install works without one.
    pub fn load(config_file: &str) -> Self {
        let mut cfg = match file_utils::open_file(&PathBuf::from(config_file)) {
            Some(file) => match serde_yaml::from_reader(file) {
                Ok(cfg) => cfg,
                Err(err) => {
                    log::error!("cant read config file {config_file}: {err}");
                    Config::default()
                }
            },
            None => {
                debug!("no config file at {config_file}, using defaults");
                Config::default()
            }
        };
        cfg.prepare();
        cfg
    }

    pub fn prepare(&mut self) {
        self.working_dir = file_utils::get_working_path(&self.working_dir);
    }

    pub fn userdata_path(&self) -> PathBuf {
        file_utils::get_file_path(&self.working_dir, Some(PathBuf::from(&self.userdata_file)))
            .unwrap_or_else(|| PathBuf::from(&self.userdata_file))
    }

    /// Image CDN url for an asset image pack.
    pub fn image_url(&self, image_pack: &str, location: &str, width: u32) -> String {
        format!("{}/{image_pack}?location={location}&imwidth={width}", self.api.image_url)
    }

    /// 1x1 sport logo used by the sport menu.
    pub fn sport_logo_url(&self, sport: &str) -> String {
        format!("{}/sport-logos/1x1/{sport}.png?imwidth=320", self.api.resource_url)
    }
}
