use serde::Deserialize;
use std::collections::HashMap;

use super::body::Crop;

/// Multimedia entity as stored in the multimedia service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Multimedia {
    #[serde(rename = "photo")]
    Photo(MultimediaPhoto),
    #[serde(rename = "embedVideo")]
    EmbedVideo(MultimediaEmbedVideo),
    #[serde(rename = "widget")]
    Widget(MultimediaWidget),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultimediaPhoto {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    /// Id of the underlying [`Photo`] resource.
    pub resource_id: String,
    #[serde(default)]
    pub clippings: Vec<Clipping>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MultimediaEmbedVideo {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub html: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultimediaWidget {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    pub resource_id: String,
}

impl Multimedia {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Photo(m) => Some(&m.id),
            Self::EmbedVideo(m) => Some(&m.id),
            Self::Widget(m) => Some(&m.id),
            Self::Unknown => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Photo(_) => "photo",
            Self::EmbedVideo(_) => "embedVideo",
            Self::Widget(_) => "widget",
            Self::Unknown => "unknown",
        }
    }

    /// Crop of the named clipping; only photos carry clippings.
    pub fn clipping(&self, name: &str) -> Option<Crop> {
        match self {
            Self::Photo(m) => m.clippings.iter().find(|c| c.name == name).map(|c| c.crop),
            _ => None,
        }
    }
}

/// Named crop rectangle over the original image.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Clipping {
    pub name: String,
    #[serde(flatten)]
    pub crop: Crop,
}

/// Image file behind a photo multimedia or an inline body picture.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    pub file: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}
