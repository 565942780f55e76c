use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Alias, Journalist, Section};
use crate::response::{DepartmentResponse, Signature};

use super::RenderSettings;

static TWITTER_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("valid regex"));

/// Prefix a bare handle with "@"; anything else passes through unchanged.
pub fn normalize_twitter(handle: &str) -> String {
    if TWITTER_HANDLE.is_match(handle) {
        format!("@{}", handle)
    } else {
        handle.to_string()
    }
}

pub fn format_signature(
    alias: &Alias,
    journalist: &Journalist,
    section: &Section,
    wants_twitter: bool,
    settings: &RenderSettings,
) -> Signature {
    let url = if journalist.visible {
        settings.urls.journalist_url(journalist, section)
    } else {
        String::new()
    };

    let photo = journalist
        .profile_photo()
        .map(|file| settings.thumbor().journalist_image(file))
        .unwrap_or_default();

    let twitter = journalist
        .twitter
        .as_deref()
        .filter(|handle| wants_twitter && !handle.is_empty())
        .map(normalize_twitter);

    Signature {
        journalist_id: journalist.id.clone(),
        alias_id: alias.id.clone(),
        name: alias.name.clone(),
        private: alias.private,
        url,
        photo,
        departments: journalist
            .departments
            .iter()
            .map(|d| DepartmentResponse { id: d.id.clone(), name: d.name.clone() })
            .collect(),
        twitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use crate::transform::fixtures;

    fn journalist(visible: bool, twitter: Option<&str>) -> Journalist {
        Journalist {
            id: "j1".into(),
            name: "Ana Pérez".into(),
            visible,
            aliases: vec![Alias { id: "a1".into(), name: "A. Pérez".into(), private: false }],
            departments: vec![Department { id: "d1".into(), name: "Economía".into() }],
            photo: Some("photo.jpg".into()),
            blog_photo: Some(String::new()),
            twitter: twitter.map(str::to_string),
        }
    }

    #[test]
    fn test_normalize_twitter() {
        assert_eq!(normalize_twitter("ana_perez"), "@ana_perez");
        assert_eq!(normalize_twitter("@ana"), "@ana");
        assert_eq!(normalize_twitter("this_is_way_too_long"), "this_is_way_too_long");
        assert_eq!(normalize_twitter("https://x.com/ana"), "https://x.com/ana");
    }

    #[test]
    fn test_visible_journalist_gets_profile_url_and_twitter() {
        let j = journalist(true, Some("ana"));
        let sig = format_signature(&j.aliases[0], &j, &fixtures::section(), true, &fixtures::settings());
        assert_eq!(sig.name, "A. Pérez");
        assert_eq!(sig.url, "https://www.elconfidencial.com/autores/ana-perez-j1/");
        assert_eq!(sig.twitter.as_deref(), Some("@ana"));
        assert!(sig.photo.ends_with("/bucket/journalist/pho/to./jpg/photo.jpg"));
        assert_eq!(sig.departments.len(), 1);
    }

    #[test]
    fn test_hidden_journalist_has_empty_url_and_no_twitter_for_news() {
        let j = journalist(false, Some("ana"));
        let sig = format_signature(&j.aliases[0], &j, &fixtures::section(), false, &fixtures::settings());
        assert_eq!(sig.url, "");
        assert_eq!(sig.twitter, None);
    }

    #[test]
    fn test_empty_handle_is_omitted() {
        let j = journalist(true, Some(""));
        let sig = format_signature(&j.aliases[0], &j, &fixtures::section(), true, &fixtures::settings());
        assert_eq!(sig.twitter, None);
    }
}
