//! Item URI

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ITEM_URI_REGEX: Regex = Regex::new(
        r"^sitecore://(?P<database>[A-Za-z0-9_-]+)(?:/(?P<id>\{[0-9A-Fa-f]{8}(?:-[0-9A-Fa-f]{4}){3}-[0-9A-Fa-f]{12}\})|(?P<path>/[^?]+))(?:\?(?P<query>.*))?$"
    )
    .unwrap();
}

/// A reference to an item in a content database, e.g.
/// `sitecore://master/{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}?lang=en&ver=1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemUri {
    /// Database name
    pub database: String,

    /// Item identifier or path
    pub path: String,

    /// Language, if given
    pub language: Option<String>,

    /// Version number, if given
    pub version: Option<u32>,
}

impl ItemUri {
    /// Parses a media reference, returning `None` if it is not an item URI
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = ITEM_URI_REGEX.captures(raw.trim())?;

        let path = captures
            .name("id")
            .or_else(|| captures.name("path"))?
            .as_str()
            .to_string();

        let mut uri = Self {
            database: captures["database"].to_string(),
            path,
            language: None,
            version: None,
        };

        if let Some(query) = captures.name("query") {
            for pair in query.as_str().split('&') {
                match pair.split_once('=') {
                    Some(("lang", lang)) if !lang.is_empty() => {
                        uri.language = Some(lang.to_string())
                    }
                    Some(("ver", ver)) => uri.version = Some(ver.parse().ok()?),
                    _ => {}
                }
            }
        }

        Some(uri)
    }

    /// Whether the path is an item identifier rather than a content path
    pub fn is_id(&self) -> bool {
        self.path.starts_with('{')
    }
}

impl fmt::Display for ItemUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_id() { "/" } else { "" };
        write!(f, "sitecore://{}{}{}", self.database, separator, self.path)?;

        let mut query = Vec::new();
        if let Some(language) = &self.language {
            query.push(format!("lang={language}"));
        }
        if let Some(version) = self.version {
            query.push(format!("ver={version}"));
        }

        if !query.is_empty() {
            write!(f, "?{}", query.join("&"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_uri() {
        let uri = ItemUri::parse("sitecore://master/{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}?lang=en&ver=2")
            .expect("valid uri");

        assert_eq!(uri.database, "master");
        assert_eq!(uri.path, "{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}");
        assert_eq!(uri.language.as_deref(), Some("en"));
        assert_eq!(uri.version, Some(2));
        assert!(uri.is_id());
    }

    #[test]
    fn test_parse_path_uri() {
        let uri = ItemUri::parse("sitecore://web/sitecore/media library/files/cv").expect("valid uri");

        assert_eq!(uri.path, "/sitecore/media library/files/cv");
        assert!(!uri.is_id());
        assert_eq!(uri.language, None);
    }

    #[test]
    fn test_parse_rejects_other_values() {
        assert_eq!(ItemUri::parse(""), None);
        assert_eq!(ItemUri::parse("hello world"), None);
        assert_eq!(ItemUri::parse("https://example.com/file.pdf"), None);
        assert_eq!(
            ItemUri::parse("sitecore://master/{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}?ver=latest"),
            None
        );
    }

    #[test]
    fn test_display_round_trips_id_uri() {
        let raw = "sitecore://master/{6C5D5A0D-2C21-4D4A-9E0B-1A2B3C4D5E6F}?lang=en&ver=1";

        assert_eq!(ItemUri::parse(raw).expect("valid uri").to_string(), raw);
    }
}
