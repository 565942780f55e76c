use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Journalist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub blog_photo: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Department {
    pub id: String,
    pub name: String,
}

impl Journalist {
    pub fn alias(&self, alias_id: &str) -> Option<&Alias> {
        self.aliases.iter().find(|a| a.id == alias_id)
    }

    /// Blog photo wins over the regular photo; empty strings count as missing.
    pub fn profile_photo(&self) -> Option<&str> {
        self.blog_photo
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.photo.as_deref().filter(|p| !p.is_empty()))
    }
}
