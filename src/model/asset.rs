use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, Serialize, Deserialize, Default)]
pub enum MediaFormat {
    #[serde(rename = "hls-ts")]
    HlsTs,
    #[serde(rename = "dash")]
    Dash,
    #[serde(other)]
    #[default]
    Other,
}

impl MediaFormat {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::HlsTs => "hls-ts",
            Self::Dash => "dash",
            Self::Other => "other",
        }
    }

    /// Formats the host player can handle, everything else is filtered out
    /// before stream selection.
    pub const fn is_playable(&self) -> bool {
        matches!(self, Self::HlsTs | Self::Dash)
    }
}

impl Display for MediaFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    #[serde(default)]
    pub media_format: MediaFormat,
    #[serde(default)]
    pub provider: String,
    pub manifest: Manifest,
}

/// A single video/event record from the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "description-short")]
    pub description_short: Option<String>,
    #[serde(default, rename = "image-pack")]
    pub image_pack: Option<String>,
    pub transmission_time: DateTime<Utc>,
    #[serde(default)]
    pub pre_check_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub is_streaming: bool,
    #[serde(default)]
    pub recommended_stream: Option<Stream>,
    #[serde(default)]
    pub alternative_streams: Vec<Stream>,
}

impl Asset {
    /// Start of the pre-roll buffer, clamped to never exceed the nominal start.
    pub fn precheck_start(&self) -> DateTime<Utc> {
        match self.pre_check_time {
            Some(precheck) if precheck < self.transmission_time => precheck,
            _ => self.transmission_time,
        }
    }

    /// Seconds between the pre-roll buffer start and the nominal event start.
    /// This is how far into the buffer playback has to seek to land on the
    /// true start. Always `>= 0`.
    pub fn start_from_secs(&self) -> u64 {
        (self.transmission_time - self.precheck_start())
            .num_seconds()
            .unsigned_abs()
    }

    /// Start used for play gating: the pre-roll start when announced,
    /// otherwise the nominal start.
    pub fn effective_start(&self) -> DateTime<Utc> {
        self.pre_check_time.unwrap_or(self.transmission_time)
    }

    pub fn streams(&self) -> impl Iterator<Item = &Stream> {
        self.recommended_stream.iter().chain(self.alternative_streams.iter())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{Asset, MediaFormat};

    pub(crate) fn test_asset(transmission: DateTime<Utc>, precheck: Option<DateTime<Utc>>) -> Asset {
        Asset {
            id: String::from("asset-1"),
            title: String::from("Grand Final"),
            description: None,
            description_short: None,
            image_pack: None,
            transmission_time: transmission,
            pre_check_time: precheck,
            is_live: false,
            is_streaming: false,
            recommended_stream: None,
            alternative_streams: Vec::new(),
        }
    }

    #[test]
    fn test_start_from_derived_from_precheck() {
        let start = Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap();
        let asset = test_asset(start, Some(start - Duration::seconds(300)));
        assert_eq!(asset.start_from_secs(), 300);
        assert_eq!(asset.precheck_start(), start - Duration::seconds(300));
    }

    #[test]
    fn test_start_from_clamped_when_precheck_after_start() {
        let start = Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap();
        let asset = test_asset(start, Some(start + Duration::seconds(120)));
        assert_eq!(asset.start_from_secs(), 0);
        assert_eq!(asset.precheck_start(), start);
    }

    #[test]
    fn test_start_from_zero_without_precheck() {
        let start = Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap();
        let asset = test_asset(start, None);
        assert_eq!(asset.start_from_secs(), 0);
        assert_eq!(asset.effective_start(), start);
    }

    #[test]
    fn test_asset_deserialize() {
        let json = r#"{
            "id": "12345",
            "title": "Round 7: Team A vs Team B",
            "description-short": "Live coverage",
            "image-pack": "pack/abc",
            "transmissionTime": "2024-05-04T12:00:00Z",
            "preCheckTime": "2024-05-04T11:55:00+00:00",
            "isLive": true,
            "isStreaming": true,
            "recommendedStream": {
                "mediaFormat": "hls-ts",
                "provider": "AKAMAI",
                "manifest": {"uri": "https://example.com/master.m3u8"}
            },
            "alternativeStreams": [
                {"mediaFormat": "smooth", "provider": "LL", "manifest": {"uri": "https://example.com/x"}}
            ]
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.id, "12345");
        assert!(asset.is_live && asset.is_streaming);
        assert_eq!(asset.start_from_secs(), 300);
        let recommended = asset.recommended_stream.as_ref().unwrap();
        assert_eq!(recommended.media_format, MediaFormat::HlsTs);
        // unknown formats deserialize to the unplayable catch-all
        assert_eq!(asset.alternative_streams[0].media_format, MediaFormat::Other);
    }
}
