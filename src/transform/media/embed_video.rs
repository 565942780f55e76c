use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::resolve_data::{ResolveData, ResolvedMultimedia};
use crate::domain::Multimedia;
use crate::error::Result;
use crate::response::MediaFragment;
use crate::transform::registry::Transformer;

use super::{MediaKind, MediaRegistry};

static DAILYMOTION_PLAYER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/player/([a-zA-Z0-9]+)\.html\?video=([a-zA-Z0-9]+)").expect("valid regex"));

/// Dailymotion embeds are split into player and video ids; other html passes through.
pub struct EmbedVideoTransformer;

impl Transformer<ResolvedMultimedia, MediaFragment> for EmbedVideoTransformer {
    fn supports(&self) -> Vec<MediaKind> {
        vec![MediaKind::EmbedVideo]
    }

    fn transform(
        &self,
        resolved: &ResolvedMultimedia,
        _: &ResolveData,
        registry: &MediaRegistry,
    ) -> Result<Option<MediaFragment>> {
        let Multimedia::EmbedVideo(video) = &resolved.multimedia else {
            return Err(registry.mismatch(resolved));
        };

        if !video.html.contains("dailymotion.com") {
            return Ok(Some(MediaFragment::EmbedVideo {
                id: video.id.clone(),
                caption: video.caption.clone(),
                html: video.html.clone(),
            }));
        }

        Ok(DAILYMOTION_PLAYER.captures(&video.html).map(|captures| MediaFragment::EmbedVideoDailyMotion {
            id: video.id.clone(),
            caption: video.caption.clone(),
            player_id: captures[1].to_string(),
            video_id: captures[2].to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::resolve_data::Placement;
    use serde_json::json;

    fn render(html: &str) -> Option<serde_json::Value> {
        let resolved = ResolvedMultimedia {
            multimedia: serde_json::from_value(json!({"type": "embedVideo", "id": "e1", "caption": "Clip", "html": html}))
                .unwrap(),
            resource: None,
            placement: Placement::Opening,
        };
        EmbedVideoTransformer
            .transform(&resolved, &ResolveData::new(), &MediaRegistry::new("multimedia"))
            .unwrap()
            .map(|f| serde_json::to_value(f).unwrap())
    }

    #[test]
    fn test_dailymotion_ids_are_extracted() {
        let out = render(r#"<iframe src="https://geo.dailymotion.com/player/x1abc.html?video=k7xyz"></iframe>"#).unwrap();
        assert_eq!(
            out,
            json!({"type": "embedVideoDailyMotion", "id": "e1", "caption": "Clip", "playerId": "x1abc", "videoId": "k7xyz"})
        );
    }

    #[test]
    fn test_unparseable_dailymotion_is_omitted() {
        assert!(render(r#"<iframe src="https://www.dailymotion.com/embed/video/k7xyz"></iframe>"#).is_none());
    }

    #[test]
    fn test_other_html_passes_through() {
        let out = render("<iframe src=\"https://vimeo.com/1\"></iframe>").unwrap();
        assert_eq!(out["type"], "embedVideo");
        assert_eq!(out["html"], "<iframe src=\"https://vimeo.com/1\"></iframe>");
    }
}
