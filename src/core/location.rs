/// Strip every whitespace character so "서울 강남구" and "서울강남구" compare equal
#[inline]
pub fn normalize_location(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check whether two free-text localities refer to the same area
///
/// Either normalized string containing the other counts as a match, so a
/// district name matches the same district qualified by its city. An empty
/// side never matches.
pub fn locations_match(preferred: &str, posting: &str) -> bool {
    let preferred = normalize_location(preferred);
    let posting = normalize_location(posting);

    if preferred.is_empty() || posting.is_empty() {
        return false;
    }

    preferred.contains(&posting) || posting.contains(&preferred)
}
