use serde::Deserialize;

use crate::constants;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub site_id: String,
    /// Path below the site root, e.g. "espana/madrid".
    pub path: String,
    #[serde(default)]
    pub encode_name: String,
    #[serde(default)]
    pub is_subdomain_blog: bool,
    #[serde(default)]
    pub parent: Option<Box<Section>>,
}

impl Section {
    pub fn subdomain(&self) -> &'static str {
        if self.is_subdomain_blog {
            "blog"
        } else {
            "www"
        }
    }

    pub fn hostname(&self) -> &'static str {
        constants::site_hostname(&self.site_id)
    }

    pub fn site_encoding(&self) -> &'static str {
        constants::site_encoding(&self.site_id)
    }

    /// This section and its ancestors, root first.
    pub fn breadcrumb(&self) -> Vec<&Section> {
        let mut chain = vec![self];
        let mut current = self.parent.as_deref();
        while let Some(section) = current {
            chain.push(section);
            current = section.parent.as_deref();
        }
        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, parent: Option<Section>) -> Section {
        Section {
            id: id.to_string(),
            name: format!("Section {}", id),
            site_id: "1".to_string(),
            path: id.to_string(),
            encode_name: id.to_string(),
            is_subdomain_blog: false,
            parent: parent.map(Box::new),
        }
    }

    #[test]
    fn test_breadcrumb_is_root_first() {
        let leaf = section("c", Some(section("b", Some(section("a", None)))));
        let ids: Vec<&str> = leaf.breadcrumb().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_subdomain() {
        let mut s = section("a", None);
        assert_eq!(s.subdomain(), "www");
        s.is_subdomain_blog = true;
        assert_eq!(s.subdomain(), "blog");
    }
}
