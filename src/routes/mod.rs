mod handlers;

pub use handlers::{dispatch, Context, RouteResult};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use url::Url;

use crate::sportcast_error::{create_sportcast_error_result, SportcastError, SportcastErrorKind};

/// Query parameter carrying the route name in a plugin url.
const ROUTE_PARAM: &str = "_";

/// Every action reachable through the host dispatcher.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Route {
    Home,
    Login,
    Logout,
    Shows,
    Sports,
    Sport,
    Show,
    Panel,
    Alert,
    Play,
    Playlist,
    SelectProfile,
    Service,
}

impl Route {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Shows => "shows",
            Self::Sports => "sports",
            Self::Sport => "sport",
            Self::Show => "show",
            Self::Panel => "panel",
            Self::Alert => "alert",
            Self::Play => "play",
            Self::Playlist => "playlist",
            Self::SelectProfile => "select_profile",
            Self::Service => "service",
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "home" => Ok(Self::Home),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            "shows" => Ok(Self::Shows),
            "sports" => Ok(Self::Sports),
            "sport" => Ok(Self::Sport),
            "show" => Ok(Self::Show),
            "panel" => Ok(Self::Panel),
            "alert" => Ok(Self::Alert),
            "play" => Ok(Self::Play),
            "playlist" => Ok(Self::Playlist),
            "select_profile" => Ok(Self::SelectProfile),
            "service" => Ok(Self::Service),
            _ => Err(format!("Invalid route: {s}")),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dispatchable invocation: route plus keyword parameters. Parameters are
/// kept sorted so rendered urls are stable.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub route: Route,
    params: BTreeMap<String, String>,
}

impl RouteRequest {
    pub fn new(route: Route) -> Self {
        Self { route, params: BTreeMap::new() }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(String::from(key), String::from(value));
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn param_u64(&self, key: &str) -> u64 {
        self.param(key).and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    pub fn to_url(&self, plugin_id: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair(ROUTE_PARAM, self.route.as_str());
        for (key, value) in &self.params {
            query.append_pair(key, value);
        }
        format!("plugin://{plugin_id}/?{}", query.finish())
    }

    pub fn parse(url_str: &str) -> Result<Self, SportcastError> {
        let url = match Url::parse(url_str) {
            Ok(url) => url,
            Err(err) => return create_sportcast_error_result!(SportcastErrorKind::Info, "malformed plugin url {url_str}: {err}"),
        };
        let mut route = Route::Home;
        let mut params = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            if key == ROUTE_PARAM {
                route = match Route::from_str(&value) {
                    Ok(route) => route,
                    Err(err) => return create_sportcast_error_result!(SportcastErrorKind::Info, "{err}"),
                };
            } else {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
        Ok(Self { route, params })
    }
}
