use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Tag family name, e.g. "personajes" or "temas".
    #[serde(rename = "type")]
    pub kind: String,
}
