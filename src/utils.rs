/// Maximum length (in characters) of a site identifier
pub const MAX_SITE_NAME_LEN: usize = 50;

/// Convert a URL to the identifier used in artifact file names
///
/// Distinct URLs may map to the same identifier, in which case their
/// artifacts overwrite each other.
pub fn sanitize_site_name(url: &str) -> String {
    // Remove protocol, then a leading www.
    let name = url.strip_prefix("https://").unwrap_or(url);
    let name = name.strip_prefix("http://").unwrap_or(name);
    let name = name.strip_prefix("www.").unwrap_or(name);

    name.replace(['/', ':', '?', '&', '='], "_")
        .chars()
        .take(MAX_SITE_NAME_LEN)
        .collect()
}
