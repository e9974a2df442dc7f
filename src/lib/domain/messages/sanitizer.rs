//! Sanitizer for resolved field values

use lazy_static::lazy_static;
use regex::Regex;

use super::links::HostUrls;

const THEME_SRC: &str = "src=\"/sitecore/shell/themes/standard/~";
const THEME_HREF: &str = "href=\"/sitecore/shell/themes/standard/~";

lazy_static! {
    static ref EVENT_HANDLER_REGEX: Regex =
        Regex::new(r#"(?i)\s*\bon\w*\s*=\s*"[^"]*""#).unwrap();
}

/// Removes inline event handler attributes such as `onclick="..."`
pub fn strip_event_handlers(text: &str) -> String {
    EVENT_HANDLER_REGEX.replace_all(text, "").into_owned()
}

/// Points design-time theme assets at the public host
pub fn rewrite_theme_paths(text: &str, hosts: &HostUrls) -> String {
    text.replace(THEME_SRC, hosts.theme_src())
        .replace(THEME_HREF, hosts.theme_href())
}

/// Applies every sanitizing rewrite to a resolved field value
pub fn sanitize(value: &str, hosts: &HostUrls) -> String {
    strip_event_handlers(&rewrite_theme_paths(value, hosts))
}
