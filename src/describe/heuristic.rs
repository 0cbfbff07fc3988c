use crate::core::constants::description::{ELLIPSIS, MAX_CHARS, MIN_CHARS};
use crate::describe::page::PageInfo;
use crate::net::authority;

/// Description for a fetched page, or `None` when the fetch failed.
///
/// Takes the first candidate that survives [`clean_candidate`]; when none
/// does, falls back to `"{title} - {authority}"`.
pub fn generate_description(page: Option<&PageInfo>, title: &str, url: &str) -> Option<String> {
    let page = page?;
    Some(choose_description(page).unwrap_or_else(|| fallback_description(title, url)))
}

pub fn choose_description(page: &PageInfo) -> Option<String> {
    page.candidates()
        .into_iter()
        .flatten()
        .find_map(clean_candidate)
}

/// Collapse whitespace, reject candidates shorter than 10 characters and
/// cut longer ones to 100 characters plus `...`.
pub fn clean_candidate(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let length = collapsed.chars().count();

    if length < MIN_CHARS {
        return None;
    }

    if length > MAX_CHARS {
        let cut: String = collapsed.chars().take(MAX_CHARS).collect();
        Some(format!("{cut}{ELLIPSIS}"))
    } else {
        Some(collapsed)
    }
}

pub fn fallback_description(title: &str, url: &str) -> String {
    format!("{title} - {}", authority(url).unwrap_or_default())
}
