use std::fmt::Write as _;
use std::path::PathBuf;

use log::info;

use crate::api::client::CatalogApi;
use crate::model::config::Config;
use crate::model::panel::{ContentType, PanelRow};
use crate::processing::content::{IMAGE_WIDTH, THUMB_LOCATION};
use crate::routes::{Route, RouteRequest};
use crate::sportcast_error::SportcastError;
use crate::utils::file_utils;

/// Renders the channels panel as an M3U document, every entry pointing back
/// at this add-on's own play route.
pub fn render_playlist(config: &Config, panel: &PanelRow) -> String {
    let mut playlist = String::from("#EXTM3U x-tvg-url=\"\"\n\n");
    let mut count = 1;
    for entry in &panel.contents {
        if entry.content_type != ContentType::Video {
            continue;
        }
        let Some(data) = &entry.data else { continue };
        let asset = &data.asset;
        let logo = asset
            .image_pack
            .as_ref()
            .map(|pack| config.image_url(pack, THUMB_LOCATION, IMAGE_WIDTH))
            .unwrap_or_default();
        let path = RouteRequest::new(Route::Play)
            .with_param("id", &asset.id)
            .to_url(&config.plugin_id);
        let _ = write!(
            playlist,
            "#EXTINF:-1 tvg-name=\"{count:03}\" tvg-id=\"{}\" tvg-logo=\"{logo}\",{}\n{path}\n\n",
            asset.id, asset.title
        );
        count += 1;
    }
    String::from(playlist.trim())
}

pub fn write_playlist(config: &Config, api: &CatalogApi, output: Option<&str>) -> Result<PathBuf, SportcastError> {
    let panel = api.panel(&config.channels_panel_id)?;
    let playlist = render_playlist(config, &panel);

    let file_name = output.filter(|o| !o.is_empty()).unwrap_or("playlist.m3u8");
    let path = file_utils::get_file_path(&config.working_dir, Some(PathBuf::from(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name));
    std::fs::write(&path, playlist)?;
    info!("playlist written to {path:?}");
    Ok(path)
}
