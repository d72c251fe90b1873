use crate::model::asset::{Asset, MediaFormat, Stream};
use crate::sportcast_error::{create_sportcast_error_result, SportcastError, SportcastErrorKind};

/// Picks the best playable variant: recommended stream plus alternates,
/// filtered to formats the player understands, preferred format first and the
/// preferred provider breaking ties. The sort is stable, so the choice is
/// deterministic for a given candidate list.
pub fn select_stream<'a>(asset: &'a Asset, preferred_provider: &str) -> Result<&'a Stream, SportcastError> {
    let mut candidates: Vec<&Stream> = asset.streams().filter(|s| s.media_format.is_playable()).collect();
    if candidates.is_empty() {
        return create_sportcast_error_result!(SportcastErrorKind::NoStream, "no playable stream for {}", asset.id);
    }
    candidates.sort_by_key(|s| (s.media_format != MediaFormat::HlsTs, s.provider != preferred_provider));
    Ok(candidates[0])
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::select_stream;
    use crate::model::asset::tests::test_asset;
    use crate::model::asset::{Manifest, MediaFormat, Stream};
    use crate::sportcast_error::SportcastErrorKind;

    fn stream(format: MediaFormat, provider: &str, uri: &str) -> Stream {
        Stream {
            media_format: format,
            provider: String::from(provider),
            manifest: Manifest { uri: String::from(uri) },
        }
    }

    fn asset_with_streams(recommended: Stream, alternatives: Vec<Stream>) -> crate::model::asset::Asset {
        let mut asset = test_asset(Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(), None);
        asset.recommended_stream = Some(recommended);
        asset.alternative_streams = alternatives;
        asset
    }

    #[test]
    fn test_prefers_hls_over_dash() {
        let asset = asset_with_streams(
            stream(MediaFormat::Dash, "AKAMAI", "dash-akamai"),
            vec![stream(MediaFormat::HlsTs, "CLOUDFRONT", "hls-cloudfront")],
        );
        assert_eq!(select_stream(&asset, "AKAMAI").unwrap().manifest.uri, "hls-cloudfront");
    }

    #[test]
    fn test_preferred_provider_breaks_ties() {
        let asset = asset_with_streams(
            stream(MediaFormat::HlsTs, "CLOUDFRONT", "hls-cloudfront"),
            vec![stream(MediaFormat::HlsTs, "AKAMAI", "hls-akamai")],
        );
        assert_eq!(select_stream(&asset, "AKAMAI").unwrap().manifest.uri, "hls-akamai");
    }

    #[test]
    fn test_unsupported_formats_never_selected() {
        let asset = asset_with_streams(
            stream(MediaFormat::Other, "AKAMAI", "smooth"),
            vec![stream(MediaFormat::Dash, "CLOUDFRONT", "dash-cloudfront")],
        );
        assert_eq!(select_stream(&asset, "AKAMAI").unwrap().manifest.uri, "dash-cloudfront");
    }

    #[test]
    fn test_no_playable_stream_fails() {
        let asset = asset_with_streams(stream(MediaFormat::Other, "AKAMAI", "smooth"), vec![]);
        let err = select_stream(&asset, "AKAMAI").unwrap_err();
        assert_eq!(err.kind(), SportcastErrorKind::NoStream);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let asset = asset_with_streams(
            stream(MediaFormat::HlsTs, "LIMELIGHT", "hls-first"),
            vec![stream(MediaFormat::HlsTs, "CLOUDFRONT", "hls-second")],
        );
        // no candidate matches the preferred provider, list order decides
        for _ in 0..3 {
            assert_eq!(select_stream(&asset, "AKAMAI").unwrap().manifest.uri, "hls-first");
        }
    }
}
