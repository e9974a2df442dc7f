//! Link rewriting

use crate::domain::communication::links::LinkResolver;

use super::errors::ConfigurationError;

const ITEM_HREF: &str = "href=\"/";
const MEDIA_HREF: &str = "href=\"~/";

/// Absolute link prefixes for the public host, computed once and shared
/// between messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrls {
    src: String,
    short_href: String,
    short_href_media: String,
    href: String,
}

impl HostUrls {
    /// Build the prefixes for a server URL such as `https://www.example.com`
    pub fn new(server_url: &str) -> Result<Self, ConfigurationError> {
        let server_url = server_url.trim().trim_end_matches('/');

        if server_url.is_empty() {
            return Err(ConfigurationError::MissingServerUrl);
        }

        let short_href = format!("href=\"{server_url}/");

        Ok(Self {
            src: format!("src=\"{server_url}/~"),
            short_href_media: format!("href=\"{server_url}/~/"),
            href: format!("{short_href}~"),
            short_href,
        })
    }

    pub(crate) fn theme_src(&self) -> &str {
        &self.src
    }

    pub(crate) fn theme_href(&self) -> &str {
        &self.href
    }

    /// Makes root-relative item links absolute
    pub fn add_host_to_item_link(&self, body: &mut String) {
        if body.contains(ITEM_HREF) {
            *body = body.replace(ITEM_HREF, &self.short_href);
        }
    }

    /// Makes `~/` media links absolute
    pub fn add_host_to_media_link(&self, body: &mut String) {
        if body.contains(MEDIA_HREF) {
            *body = body.replace(MEDIA_HREF, &self.short_href_media);
        }
    }
}

/// Replaces the body with the resolver's expansion of its dynamic links
pub fn expand_dynamic_links<L: LinkResolver>(resolver: &L, body: &mut String) {
    *body = resolver.expand_dynamic_links(body);
}
