use crate::domain::{Editorial, Journalist, Section, Tag};

/// Lowercase ASCII slug; Spanish diacritics are folded, other letters kept and percent-encoded.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        };
        if folded.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(folded);
        } else {
            pending_dash = true;
        }
    }
    urlencoding::encode(&out).into_owned()
}

/// Absolute URLs on the public sites.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    extension: String,
}

impl UrlGenerator {
    pub fn new(extension: impl Into<String>) -> Self {
        Self { extension: extension.into() }
    }

    /// `https://{subdomain}.{site host}.{extension}/{path}`
    pub fn site_url(&self, subdomain: &str, section: &Section, path: &str) -> String {
        format!(
            "https://{}.{}.{}/{}",
            subdomain,
            section.hostname(),
            self.extension,
            path.trim_matches('/')
        )
    }

    pub fn editorial_url(&self, editorial: &Editorial, section: &Section) -> String {
        let path = format!(
            "{}/{}/{}_{}",
            section.path.trim_matches('/'),
            editorial.publication_date.format("%Y-%m-%d"),
            slug(&editorial.titles.url_title),
            editorial.id
        );
        self.site_url(section.subdomain(), section, &path)
    }

    pub fn section_url(&self, section: &Section) -> String {
        with_trailing_slash(self.site_url(section.subdomain(), section, &section.path))
    }

    pub fn tag_url(&self, tag: &Tag, section: &Section) -> String {
        let path = format!("tags/{}/{}-{}", slug(&tag.kind), slug(&tag.name), tag.id);
        self.site_url("www", section, &path)
    }

    pub fn journalist_url(&self, journalist: &Journalist, section: &Section) -> String {
        let path = format!("autores/{}-{}", slug(&journalist.name), journalist.id);
        with_trailing_slash(self.site_url("www", section, &path))
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(site_id: &str, blog: bool) -> Section {
        Section {
            id: "s1".into(),
            name: "España".into(),
            site_id: site_id.into(),
            path: "/espana/".into(),
            encode_name: "espana".into(),
            is_subdomain_blog: blog,
            parent: None,
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Pedro Sánchez, el presidente"), "pedro-sanchez-el-presidente");
        assert_eq!(slug("  ¿Qué pasa?  "), "que-pasa");
        assert_eq!(slug("Straße"), "stra%C3%9Fe");
    }

    #[test]
    fn test_section_and_journalist_urls() {
        let urls = UrlGenerator::new("com");
        assert_eq!(urls.section_url(&section("1", false)), "https://www.elconfidencial.com/espana/");
        assert_eq!(urls.section_url(&section("2", true)), "https://blog.vanitatis.elconfidencial.com/espana/");

        let mut home = section("1", false);
        home.path = String::new();
        assert_eq!(urls.section_url(&home), "https://www.elconfidencial.com/");

        let journalist = Journalist {
            id: "21".into(),
            name: "Ana Núñez".into(),
            visible: true,
            aliases: vec![],
            departments: vec![],
            photo: None,
            blog_photo: None,
            twitter: None,
        };
        assert_eq!(
            urls.journalist_url(&journalist, &section("1", true)),
            "https://www.elconfidencial.com/autores/ana-nunez-21/"
        );
    }

    #[test]
    fn test_tag_url() {
        let urls = UrlGenerator::new("dev");
        let tag = Tag { id: "7".into(), name: "Real Madrid".into(), kind: "Temas".into() };
        assert_eq!(urls.tag_url(&tag, &section("1", false)), "https://www.elconfidencial.dev/tags/temas/real-madrid-7");
    }
}
