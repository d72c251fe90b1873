use serde::{Deserialize, Serialize};

use crate::model::asset::Asset;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub enum PanelType {
    #[serde(rename = "hero-carousel")]
    HeroCarousel,
    #[serde(other)]
    #[default]
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Section,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentData {
    pub asset: Asset,
}

/// One `{contentType, data.asset}` entry inside a panel. Entries with an
/// unrecognized content type still deserialize, the parser skips them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub data: Option<ContentData>,
}

/// A named grouping of content rows returned by the landing/show APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub panel_type: PanelType,
    #[serde(default)]
    pub contents: Vec<ContentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportEntry {
    pub name: String,
    pub sport: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<String>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::{ContentType, PanelRow, PanelType};

    #[test]
    fn test_panel_row_deserialize() {
        let json = r#"{
            "id": "p1",
            "title": "Top Picks",
            "panelType": "hero-carousel",
            "contents": [
                {"contentType": "video", "data": {"asset": {"id": "a", "title": "t", "transmissionTime": "2024-05-04T12:00:00Z"}}},
                {"contentType": "promo-banner"}
            ]
        }"#;
        let row: PanelRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.panel_type, PanelType::HeroCarousel);
        assert_eq!(row.contents.len(), 2);
        assert_eq!(row.contents[0].content_type, ContentType::Video);
        assert_eq!(row.contents[1].content_type, ContentType::Unknown);
        assert!(row.contents[1].data.is_none());
    }

    #[test]
    fn test_unknown_panel_type() {
        let row: PanelRow = serde_json::from_str(r#"{"id": "x", "title": "Rail", "panelType": "standard-rail"}"#).unwrap();
        assert_eq!(row.panel_type, PanelType::Other);
        assert!(row.contents.is_empty());
    }
}
