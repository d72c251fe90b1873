use chrono::{DateTime, Utc};

use crate::api::client::CatalogApi;
use crate::host::HostBridge;
use crate::model::asset::{Asset, MediaFormat};
use crate::model::config::{Config, DEFAULT_USER_AGENT};
use crate::model::menu::{InputStreamComponent, PlayType, PlayableItem};
use crate::processing::stream_select::select_stream;
use crate::sportcast_error::{create_sportcast_error_result, SportcastError, SportcastErrorKind};
use crate::utils::time_utils::humanize_delta;

/// Resolves a play action for an asset id: fetches the stream candidates and
/// builds the playable descriptor.
pub fn resolve_play(
    config: &Config,
    api: &CatalogApi,
    host: &dyn HostBridge,
    asset_id: &str,
    is_live: bool,
    start_from: u64,
    play_type: PlayType,
    now: DateTime<Utc>,
) -> Result<PlayableItem, SportcastError> {
    let asset = api.stream_info(asset_id)?;
    build_playable(config, host, &asset, is_live, start_from, play_type, now)
}

pub fn build_playable(
    config: &Config,
    host: &dyn HostBridge,
    asset: &Asset,
    is_live: bool,
    start_from: u64,
    play_type: PlayType,
    now: DateTime<Utc>,
) -> Result<PlayableItem, SportcastError> {
    let start = asset.effective_start();
    if start > now {
        return create_sportcast_error_result!(
            SportcastErrorKind::NotStarted,
            "{} has not started, starts {}",
            asset.title,
            humanize_delta(now, start)
        );
    }

    let stream = select_stream(asset, &config.preferred_provider)?;
    let component = match stream.media_format {
        MediaFormat::Dash => InputStreamComponent::Mpd,
        MediaFormat::HlsTs => InputStreamComponent::Hls,
        MediaFormat::Other => {
            return create_sportcast_error_result!(SportcastErrorKind::NoStream, "no playable stream for {}", asset.id)
        }
    };
    if !host.has_component(component) {
        return create_sportcast_error_result!(
            SportcastErrorKind::ComponentMissing,
            "{} is required to play this stream",
            component.addon_id()
        );
    }

    // ask only once the stream is known playable
    let offset = resume_offset(host, is_live, start_from, play_type)?;

    let mut item = PlayableItem {
        url: stream.manifest.uri.clone(),
        headers: vec![(String::from("User-Agent"), String::from(DEFAULT_USER_AGENT))],
        input_stream: Some(component),
        resume_time_secs: None,
        total_time_secs: None,
    };
    if offset > 0 {
        item.resume_time_secs = Some(offset);
        item.total_time_secs = Some(offset);
    }
    Ok(item)
}

/// The actual seek offset. The play type only governs live items: the live
/// edge for `from_live` (or when the user picks it in `ask` mode), otherwise
/// the buffered start. On-demand items always seek to the computed start.
fn resume_offset(host: &dyn HostBridge, is_live: bool, start_from: u64, play_type: PlayType) -> Result<u64, SportcastError> {
    if !is_live {
        return Ok(start_from);
    }
    match play_type {
        PlayType::FromLive => Ok(0),
        PlayType::FromStart => Ok(start_from),
        PlayType::Ask => {
            if start_from == 0 {
                return Ok(0);
            }
            let options = [String::from("From Live"), String::from("From Start")];
            match host.select("Play from", &options) {
                Some(0) => Ok(0),
                Some(_) => Ok(start_from),
                None => create_sportcast_error_result!(SportcastErrorKind::Info, "playback cancelled"),
            }
        }
    }
}
