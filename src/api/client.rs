use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::asset::Asset;
use crate::model::config::{Config, ConfigApi, DEFAULT_USER_AGENT};
use crate::model::panel::{PanelRow, Profile, SportEntry};
use crate::repository::userdata::Userdata;
use crate::sportcast_error::{create_sportcast_error_result, SportcastError, SportcastErrorKind};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPair {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Authenticated client for the remote catalog/streaming backend. One
/// instance is constructed per dispatch cycle and its session re-established
/// before the handler runs.
pub struct CatalogApi {
    client: reqwest::blocking::Client,
    api: ConfigApi,
    profile: Option<String>,
    access_token: Option<String>,
}

impl CatalogApi {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api: config.api.clone(),
            profile: None,
            access_token: None,
        }
    }

    pub fn logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Re-establishes the session from persisted userdata. A failed refresh
    /// only leaves the client logged out, browsing public content still works.
    pub fn new_session(&mut self, userdata: &Userdata) {
        self.profile = userdata.profile.clone();
        self.access_token = None;
        let Some(refresh_token) = userdata.refresh_token.as_deref() else {
            return;
        };
        let url = format!("{}/token", self.api.auth_url);
        let body = serde_json::json!({ "refreshToken": refresh_token });
        match self.client.post(&url).json(&body).send() {
            Ok(response) if response.status().is_success() => match response.json::<TokenPair>() {
                Ok(tokens) => self.access_token = Some(tokens.access_token),
                Err(err) => debug!("session token decode failed: {err}"),
            },
            Ok(response) => debug!("session refresh rejected: {}", response.status()),
            Err(err) => error!("session refresh failed: {err}"),
        }
    }

    /// Logs in and returns the refresh token to persist.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Option<String>, SportcastError> {
        let url = format!("{}/login", self.api.auth_url);
        let body = serde_json::json!({ "email": username, "password": password });
        let response = self.client.post(&url).json(&body).send()?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return create_sportcast_error_result!(SportcastErrorKind::Auth, "login failed for {username}");
        }
        if !status.is_success() {
            return create_sportcast_error_result!(SportcastErrorKind::Upstream, "login request failed: {status}");
        }
        let tokens: TokenPair = response.json()?;
        self.access_token = Some(tokens.access_token);
        Ok(tokens.refresh_token)
    }

    pub fn logout(&mut self) {
        self.access_token = None;
        self.profile = None;
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SportcastError> {
        debug!("get {url}");
        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return create_sportcast_error_result!(SportcastErrorKind::Auth, "session expired");
        }
        if !status.is_success() {
            return create_sportcast_error_result!(SportcastErrorKind::Upstream, "request failed: {status}");
        }
        response.json::<T>().map_err(Into::into)
    }

    fn landing_url(&self, name: &str, sport: Option<&str>) -> String {
        let mut url = format!("{}/types/landing/names/{name}?evaluate=3", self.api.content_url);
        if let Some(sport) = sport {
            url.push_str("&sport=");
            url.push_str(sport);
        }
        // profile scoped
        if let Some(profile) = &self.profile {
            url.push_str("&profile=");
            url.push_str(profile);
        }
        url
    }

    pub fn landing(&self, name: &str, sport: Option<&str>) -> Result<Vec<PanelRow>, SportcastError> {
        self.get_json(&self.landing_url(name, sport))
    }

    pub fn panel(&self, id: &str) -> Result<PanelRow, SportcastError> {
        self.get_json(&format!("{}/types/carousel/keys/{id}?evaluate=3", self.api.content_url))
    }

    pub fn show(&self, id: &str) -> Result<Vec<PanelRow>, SportcastError> {
        self.get_json(&format!("{}/types/show/keys/{id}?evaluate=3", self.api.content_url))
    }

    pub fn sport_menu(&self, sport: &str) -> Result<Vec<SportEntry>, SportcastError> {
        self.get_json(&format!("{}/sport-menu/{sport}", self.api.content_url))
    }

    /// Current state of a single event, used by item listings and the alert
    /// checker.
    pub fn event(&self, id: &str) -> Result<Asset, SportcastError> {
        self.get_json(&format!("{}/assets/{id}", self.api.content_url))
    }

    /// Asset with its stream candidates resolved for playback.
    pub fn stream_info(&self, id: &str) -> Result<Asset, SportcastError> {
        self.get_json(&format!("{}/asset/{id}/play", self.api.play_url))
    }

    pub fn profiles(&self) -> Result<Vec<Profile>, SportcastError> {
        self.get_json(&format!("{}/user/profile", self.api.profile_url))
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogApi;
    use crate::model::config::Config;
    use crate::repository::userdata::Userdata;

    #[test]
    fn test_landing_url_carries_profile() {
        let cfg = Config::default();
        let mut api = CatalogApi::new(&cfg);
        assert_eq!(
            api.landing_url("home", None),
            "https://vccapi.kayosports.com.au/content/types/landing/names/home?evaluate=3"
        );

        let mut userdata = Userdata::default();
        userdata.profile = Some(String::from("d3bf57f6"));
        api.new_session(&userdata);
        assert_eq!(
            api.landing_url("sport", Some("tennis")),
            "https://vccapi.kayosports.com.au/content/types/landing/names/sport?evaluate=3&sport=tennis&profile=d3bf57f6"
        );
    }

    #[test]
    fn test_session_without_token_stays_logged_out() {
        let cfg = Config::default();
        let mut api = CatalogApi::new(&cfg);
        api.new_session(&Userdata::default());
        assert!(!api.logged_in());
    }
}
