use crate::app::resolve_data::{ResolveData, ResolvedMultimedia};
use crate::domain::Multimedia;
use crate::error::Result;
use crate::response::MediaFragment;
use crate::transform::registry::Transformer;

use super::{MediaKind, MediaRegistry};

const HTML_WIDGET: &str = "html";
const ASPECT_RATIO_PARAM: &str = "aspect-ratio";

/// "16/9" -> 1.8; `None` for malformed values or a zero denominator.
pub fn parse_aspect_ratio(value: &str) -> Option<f64> {
    let (width, height) = value.split_once('/')?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;
    if height == 0.0 {
        return None;
    }
    Some((width / height * 10.0).round() / 10.0)
}

pub struct WidgetTransformer;

impl Transformer<ResolvedMultimedia, MediaFragment> for WidgetTransformer {
    fn supports(&self) -> Vec<MediaKind> {
        vec![MediaKind::Widget]
    }

    fn transform(
        &self,
        resolved: &ResolvedMultimedia,
        _: &ResolveData,
        registry: &MediaRegistry,
    ) -> Result<Option<MediaFragment>> {
        let Multimedia::Widget(multimedia) = &resolved.multimedia else {
            return Err(registry.mismatch(resolved));
        };
        let Some(widget) = resolved.widget() else {
            return Ok(None);
        };
        let aspect_ratio = if widget.kind == HTML_WIDGET {
            widget.params.get(ASPECT_RATIO_PARAM).and_then(|v| parse_aspect_ratio(v))
        } else {
            None
        };
        Ok(Some(MediaFragment::Widget {
            caption: multimedia.caption.clone(),
            url: widget.url.clone(),
            aspect_ratio,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::resolve_data::{MediaResource, Placement};
    use crate::domain::Widget;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_parse_aspect_ratio() {
        assert_eq!(parse_aspect_ratio("16/9"), Some(1.8));
        assert_eq!(parse_aspect_ratio("4/3"), Some(1.3));
        assert_eq!(parse_aspect_ratio("1/0"), None);
        assert_eq!(parse_aspect_ratio("wide"), None);
    }

    #[test]
    fn test_html_widget_output() {
        let resolved = ResolvedMultimedia {
            multimedia: serde_json::from_value(json!({"type": "widget", "id": "w1", "caption": "Poll", "resourceId": "r"}))
                .unwrap(),
            resource: Some(MediaResource::Widget(Widget {
                id: "r".into(),
                kind: "html".into(),
                url: "https://widgets.local/r".into(),
                params: HashMap::from([("aspect-ratio".to_string(), "4/3".to_string())]),
            })),
            placement: Placement::Opening,
        };
        let out = WidgetTransformer
            .transform(&resolved, &ResolveData::new(), &MediaRegistry::new("multimedia"))
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(out).unwrap(),
            json!({"type": "widget", "caption": "Poll", "url": "https://widgets.local/r", "aspectRatio": 1.3})
        );
    }
}
