use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routes::RouteRequest;

/// User preference governing where live playback starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    #[default]
    FromLive,
    FromStart,
    Ask,
}

impl PlayType {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::FromLive => "from_live",
            Self::FromStart => "from_start",
            Self::Ask => "ask",
        }
    }
}

impl FromStr for PlayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from_live" => Ok(Self::FromLive),
            "from_start" => Ok(Self::FromStart),
            "ask" => Ok(Self::Ask),
            _ => Err(format!("Invalid play type: {s}")),
        }
    }
}

impl Display for PlayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the host is asked to run a context action.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ActionKind {
    RunPlugin,
    PlayMedia,
}

impl ActionKind {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::RunPlugin => "RunPlugin",
            Self::PlayMedia => "PlayMedia",
        }
    }
}

/// Structured "action + route + params" descriptor. Rendered to the host's
/// builtin invocation string only at the boundary.
#[derive(Debug, Clone)]
pub struct HostAction {
    pub kind: ActionKind,
    pub request: RouteRequest,
}

impl HostAction {
    pub fn new(kind: ActionKind, request: RouteRequest) -> Self {
        Self { kind, request }
    }

    pub fn render(&self, plugin_id: &str) -> String {
        format!("{}({})", self.kind.as_str(), self.request.to_url(plugin_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Artwork {
    pub thumb: Option<String>,
    pub fanart: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemInfo {
    pub plot: Option<String>,
    pub plot_outline: Option<String>,
    pub media_type: Option<String>,
    pub playcount: Option<u32>,
}

/// A display descriptor handed to the host menu: navigable folder entry or
/// playable leaf.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub art: Artwork,
    pub info: ItemInfo,
    pub path: Option<RouteRequest>,
    pub context: Vec<(String, HostAction)>,
    pub playable: bool,
    pub is_folder: bool,
}

impl MenuItem {
    pub fn folder(label: String, path: RouteRequest) -> Self {
        Self {
            label,
            art: Artwork::default(),
            info: ItemInfo::default(),
            path: Some(path),
            context: Vec::new(),
            playable: false,
            is_folder: true,
        }
    }

    /// Non-folder, non-playable entry that just invokes a route.
    pub fn action(label: String, path: RouteRequest) -> Self {
        Self {
            label,
            art: Artwork::default(),
            info: ItemInfo::default(),
            path: Some(path),
            context: Vec::new(),
            playable: false,
            is_folder: false,
        }
    }

    pub fn playable(label: String, path: RouteRequest) -> Self {
        Self {
            label,
            art: Artwork::default(),
            info: ItemInfo::default(),
            path: Some(path),
            context: Vec::new(),
            playable: true,
            is_folder: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Folder {
    pub title: String,
    pub items: Vec<MenuItem>,
    pub cache_to_disc: bool,
}

impl Folder {
    pub fn new(title: &str) -> Self {
        Self {
            title: String::from(title),
            items: Vec::new(),
            cache_to_disc: true,
        }
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn add_items(&mut self, items: Vec<MenuItem>) {
        self.items.extend(items);
    }
}

/// Platform playback component required for a stream format.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputStreamComponent {
    Mpd,
    Hls,
}

impl InputStreamComponent {
    pub const fn addon_id(&self) -> &str {
        match self {
            Self::Mpd | Self::Hls => "inputstream.adaptive",
        }
    }

    pub const fn manifest_type(&self) -> &str {
        match self {
            Self::Mpd => "mpd",
            Self::Hls => "hls",
        }
    }
}

/// Resolved playback descriptor handed to the host player.
#[derive(Debug, Clone)]
pub struct PlayableItem {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub input_stream: Option<InputStreamComponent>,
    pub resume_time_secs: Option<u64>,
    pub total_time_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ActionKind, HostAction, PlayType};
    use crate::routes::{Route, RouteRequest};

    #[test]
    fn test_play_type_round_trip() {
        for play_type in [PlayType::FromLive, PlayType::FromStart, PlayType::Ask] {
            assert_eq!(PlayType::from_str(play_type.as_str()), Ok(play_type));
        }
        assert!(PlayType::from_str("sometimes").is_err());
    }

    #[test]
    fn test_action_rendered_at_boundary() {
        let request = RouteRequest::new(Route::Alert)
            .with_param("asset", "123")
            .with_param("title", "Final");
        let action = HostAction::new(ActionKind::RunPlugin, request);
        assert_eq!(
            action.render("plugin.video.sportcast"),
            "RunPlugin(plugin://plugin.video.sportcast/?_=alert&asset=123&title=Final)"
        );
    }
}
