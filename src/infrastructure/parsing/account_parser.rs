//! Account pages and small AJAX responses

use super::extractor::{extract_attribute, extract_text, select_first};
use super::ParsingResult;
use crate::domain::UserProfile;
use scraper::Html;

const USER_ID_COOKIE: &str = "dle_user_id=";
const DELETED_MARKER: &str = "deleted";

/// Signed-in user id carried by a `Set-Cookie` header, if any
///
/// Logout responses reset the cookie to `deleted`; those are ignored.
pub fn user_id_from_cookies<S: AsRef<str>>(set_cookies: &[S]) -> Option<String> {
    set_cookies
        .iter()
        .map(AsRef::as_ref)
        .filter(|cookie| cookie.starts_with(USER_ID_COOKIE) && !cookie.contains(DELETED_MARKER))
        .find_map(|cookie| {
            let value = cookie[USER_ID_COOKIE.len()..].split(';').next()?.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
}

/// Profile settings page (`user/{id}/`)
pub fn parse_profile(html: &Html) -> UserProfile {
    let root = html.root_element();
    UserProfile {
        email: extract_attribute(root, "value", Some("#email")).ok(),
        gender: extract_text(root, Some("#gender option[selected]")).ok(),
        avatar: extract_attribute(root, "src", Some("#avatar-profile img")).ok(),
    }
}

/// Canonical item URL from the quick-content bubble
pub fn parse_quick_content_url(html: &Html) -> ParsingResult<String> {
    let title = select_first(html.root_element(), ".b-content__bubble_title")?;
    extract_attribute(title, "href", Some("a"))
}
