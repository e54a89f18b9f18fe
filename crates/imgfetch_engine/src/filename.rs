use url::Url;

/// Filename for a saved image: the URL path's basename when it carries an
/// extension, otherwise the generated `image_<sequence>.jpg`.
///
/// `sequence` is the dedupe-store size at save time. Distinct URLs can share
/// a basename; the writer overwrites in that case.
pub fn image_filename(url: &str, sequence: usize) -> String {
    match basename_with_extension(url) {
        Some(name) => sanitize(&name),
        None => format!("image_{sequence}.jpg"),
    }
}

/// Last path segment of the URL (query and fragment excluded), only when it
/// contains a dot. A trailing slash yields an empty segment and falls through
/// to the generated name.
fn basename_with_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next().unwrap_or("");
    if segment.is_empty() || segment == "." || segment == ".." || !segment.contains('.') {
        return None;
    }
    Some(segment.to_string())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
