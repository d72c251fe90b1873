use chrono::{DateTime, Utc};

use crate::model::asset::Asset;
use crate::model::config::Config;
use crate::model::menu::{ActionKind, Artwork, HostAction, MenuItem, PlayType};
use crate::model::panel::{ContentEntry, ContentType, PanelRow, PanelType};
use crate::repository::userdata::Userdata;
use crate::routes::{Route, RouteRequest};
use crate::utils::time_utils::humanize_delta;

pub const THUMB_LOCATION: &str = "carousel-item";
pub const FANART_LOCATION: &str = "hero-default";
pub const IMAGE_WIDTH: u32 = 2048;

pub fn asset_artwork(config: &Config, asset: &Asset) -> Artwork {
    Artwork {
        thumb: asset.image_pack.as_ref().map(|pack| config.image_url(pack, THUMB_LOCATION, IMAGE_WIDTH)),
        fanart: asset.image_pack.as_ref().map(|pack| config.image_url(pack, FANART_LOCATION, IMAGE_WIDTH)),
    }
}

/// Turns landing page rows into menu items. Hero carousels are flattened into
/// their contents (or suppressed entirely via the user setting), every other
/// panel becomes one navigable folder entry.
pub fn parse_landing(config: &Config, userdata: &Userdata, rows: &[PanelRow], now: DateTime<Utc>) -> Vec<MenuItem> {
    let mut items = Vec::new();
    for row in rows {
        if row.panel_type == PanelType::HeroCarousel && !row.contents.is_empty() {
            if config.show_hero_contents {
                items.extend(parse_contents(config, userdata, &row.contents, now));
            }
        } else {
            items.push(parse_panel(config, row));
        }
    }
    items
}

pub fn parse_panel(config: &Config, row: &PanelRow) -> MenuItem {
    let mut item = MenuItem::folder(
        row.title.clone(),
        RouteRequest::new(Route::Panel).with_param("id", &row.id),
    );
    // preview art from the first nested asset
    if let Some(asset) = row.contents.iter().find_map(|entry| entry.data.as_ref().map(|d| &d.asset)) {
        item.art = asset_artwork(config, asset);
    }
    item
}

/// Leaf dispatch by content type; unrecognized types are silently skipped.
pub fn parse_contents(config: &Config, userdata: &Userdata, entries: &[ContentEntry], now: DateTime<Utc>) -> Vec<MenuItem> {
    entries
        .iter()
        .filter_map(|entry| {
            let asset = &entry.data.as_ref()?.asset;
            match entry.content_type {
                ContentType::Video => Some(parse_video(config, userdata, asset, now)),
                ContentType::Section => Some(parse_show(config, asset)),
                ContentType::Unknown => None,
            }
        })
        .collect()
}

pub fn parse_show(config: &Config, asset: &Asset) -> MenuItem {
    let mut item = MenuItem::folder(
        asset.title.clone(),
        RouteRequest::new(Route::Show)
            .with_param("id", &asset.id)
            .with_param("title", &asset.title),
    );
    item.art = asset_artwork(config, asset);
    item.info.plot = asset.description_short.clone();
    item.info.media_type = Some(String::from("tvshow"));
    item
}

/// Video leaf with its state classification: upcoming placeholder with a
/// reminder toggle, live entry with from-live/from-start actions, or a plain
/// on-demand entry.
pub fn parse_video(config: &Config, userdata: &Userdata, asset: &Asset, now: DateTime<Utc>) -> MenuItem {
    let start = asset.transmission_time;
    let start_from = asset.start_from_secs();

    let mut item = MenuItem::playable(asset.title.clone(), RouteRequest::new(Route::Play));
    item.art = asset_artwork(config, asset);
    item.info.plot = asset.description.clone();
    item.info.plot_outline = asset.description_short.clone();
    item.info.media_type = Some(String::from("video"));

    let mut is_live = false;

    if now < start {
        is_live = true;
        item.label = format!("{} [Starts {}]", asset.title, humanize_delta(now, start));

        let toggle = RouteRequest::new(Route::Alert)
            .with_param("asset", &asset.id)
            .with_param("title", &asset.title)
            .with_param("image", item.art.thumb.as_deref().unwrap_or(""));
        let action = HostAction::new(ActionKind::RunPlugin, toggle);
        if userdata.has_alert(&asset.id) {
            item.info.playcount = Some(1);
            item.context.push((String::from("Remove Reminder"), action));
        } else {
            item.info.playcount = Some(0);
            item.context.push((String::from("Set Reminder"), action));
        }
    } else if asset.is_live && asset.is_streaming {
        is_live = true;
        item.label = format!("{} [LIVE]", asset.title);

        // explicit choices override the configured preference
        item.context.push((
            String::from("Play From Live"),
            HostAction::new(ActionKind::PlayMedia, play_request(asset, true, 0, PlayType::FromLive)),
        ));
        item.context.push((
            String::from("Play From Start"),
            HostAction::new(ActionKind::PlayMedia, play_request(asset, true, start_from, PlayType::FromStart)),
        ));
    }

    // whether the offset is actually honored is decided at play time from the
    // play type
    item.path = Some(play_request(asset, is_live, start_from, config.live_play_type));

    item
}

fn play_request(asset: &Asset, is_live: bool, start_from: u64, play_type: PlayType) -> RouteRequest {
    RouteRequest::new(Route::Play)
        .with_param("id", &asset.id)
        .with_param("is_live", if is_live { "true" } else { "false" })
        .with_param("start_from", &start_from.to_string())
        .with_param("play_type", play_type.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{parse_landing, parse_video};
    use crate::model::asset::tests::test_asset;
    use crate::model::asset::Asset;
    use crate::model::config::Config;
    use crate::model::menu::PlayType;
    use crate::model::panel::{ContentData, ContentEntry, ContentType, PanelRow, PanelType};
    use crate::repository::userdata::Userdata;
    use crate::routes::Route;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap()
    }

    fn entry(content_type: ContentType, asset: Asset) -> ContentEntry {
        ContentEntry { content_type, data: Some(ContentData { asset }) }
    }

    fn panel(panel_type: PanelType, contents: Vec<ContentEntry>) -> PanelRow {
        PanelRow {
            id: String::from("p1"),
            title: String::from("Featured"),
            panel_type,
            contents,
        }
    }

    #[test]
    fn test_hero_carousel_is_flattened() {
        let cfg = Config::default();
        let rows = vec![panel(
            PanelType::HeroCarousel,
            vec![
                entry(ContentType::Video, test_asset(now() - Duration::hours(1), None)),
                entry(ContentType::Section, test_asset(now(), None)),
                ContentEntry { content_type: ContentType::Unknown, data: None },
            ],
        )];
        let items = parse_landing(&cfg, &Userdata::default(), &rows, now());
        // unknown entry skipped, the others are leaves not a folder
        assert_eq!(items.len(), 2);
        assert!(items[0].playable);
        assert!(items[1].is_folder);
        assert_eq!(items[1].path.as_ref().unwrap().route, Route::Show);
    }

    #[test]
    fn test_hero_contents_can_be_hidden() {
        let mut cfg = Config::default();
        cfg.show_hero_contents = false;
        let rows = vec![panel(
            PanelType::HeroCarousel,
            vec![entry(ContentType::Video, test_asset(now(), None))],
        )];
        assert!(parse_landing(&cfg, &Userdata::default(), &rows, now()).is_empty());
    }

    #[test]
    fn test_plain_panel_becomes_folder_with_preview_art() {
        let cfg = Config::default();
        let mut asset = test_asset(now(), None);
        asset.image_pack = Some(String::from("pack/xyz"));
        let rows = vec![panel(PanelType::Other, vec![entry(ContentType::Video, asset)])];
        let items = parse_landing(&cfg, &Userdata::default(), &rows, now());
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert!(item.is_folder);
        assert_eq!(item.label, "Featured");
        assert_eq!(item.path.as_ref().unwrap().route, Route::Panel);
        assert_eq!(item.path.as_ref().unwrap().param("id"), Some("p1"));
        assert!(item.art.thumb.as_ref().unwrap().contains("pack/xyz"));
    }

    #[test]
    fn test_upcoming_video_is_starting_soon_placeholder() {
        let cfg = Config::default();
        // starts in 10 minutes with a 5 minute pre-roll
        let start = now() + Duration::seconds(600);
        let asset = test_asset(start, Some(start - Duration::seconds(300)));
        let item = parse_video(&cfg, &Userdata::default(), &asset, now());

        assert_eq!(item.label, "Grand Final [Starts in 10 minutes]");
        assert_eq!(item.info.playcount, Some(0));
        assert_eq!(item.context.len(), 1);
        let (label, action) = &item.context[0];
        assert_eq!(label, "Set Reminder");
        assert_eq!(action.request.route, Route::Alert);
        assert_eq!(action.request.param("asset"), Some("asset-1"));
        assert_eq!(item.path.as_ref().unwrap().param_u64("start_from"), 300);
    }

    #[test]
    fn test_reminder_label_reflects_alert_set() {
        let cfg = Config::default();
        let asset = test_asset(now() + Duration::seconds(600), None);
        let mut userdata = Userdata::default();
        userdata.toggle_alert("asset-1");
        let item = parse_video(&cfg, &userdata, &asset, now());
        assert_eq!(item.context[0].0, "Remove Reminder");
        assert_eq!(item.info.playcount, Some(1));
    }

    #[test]
    fn test_live_video_offers_both_edges() {
        let cfg = Config::default();
        let start = now() - Duration::seconds(60);
        let mut asset = test_asset(start, Some(start - Duration::seconds(300)));
        asset.is_live = true;
        asset.is_streaming = true;
        let item = parse_video(&cfg, &Userdata::default(), &asset, now());

        assert_eq!(item.label, "Grand Final [LIVE]");
        assert_eq!(item.context.len(), 2);
        assert_eq!(item.context[0].0, "Play From Live");
        assert_eq!(item.context[0].1.request.param_u64("start_from"), 0);
        assert_eq!(item.context[1].0, "Play From Start");
        assert_eq!(item.context[1].1.request.param_u64("start_from"), 300);
        assert_eq!(item.context[1].1.request.param("play_type"), Some("from_start"));
        // the path always carries the computed offset, the play handler
        // decides whether to honor it
        let path = item.path.as_ref().unwrap();
        assert_eq!(path.param_u64("start_from"), 300);
        assert_eq!(path.param("is_live"), Some("true"));
        assert_eq!(path.param("play_type"), Some("from_live"));
    }

    #[test]
    fn test_live_path_carries_configured_play_type() {
        let mut cfg = Config::default();
        cfg.live_play_type = PlayType::Ask;
        let start = now() - Duration::seconds(60);
        let mut asset = test_asset(start, Some(start - Duration::seconds(300)));
        asset.is_live = true;
        asset.is_streaming = true;
        let item = parse_video(&cfg, &Userdata::default(), &asset, now());
        let path = item.path.as_ref().unwrap();
        assert_eq!(path.param_u64("start_from"), 300);
        assert_eq!(path.param("play_type"), Some("ask"));
    }

    #[test]
    fn test_finished_video_is_plain_on_demand() {
        let cfg = Config::default();
        let mut asset = test_asset(now() - Duration::hours(3), None);
        asset.is_live = false;
        let item = parse_video(&cfg, &Userdata::default(), &asset, now());
        assert_eq!(item.label, "Grand Final");
        assert!(item.context.is_empty());
        assert!(item.playable);
        assert_eq!(item.path.as_ref().unwrap().param("is_live"), Some("false"));
    }
}
