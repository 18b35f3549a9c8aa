use deunicode::deunicode;

/// File-name slug of an entry name.
///
/// ASCII-transliterates, lowercases, drops apostrophes and joins the
/// remaining alphanumeric runs with single dashes. May return an empty
/// string when `name` has no alphanumeric content.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c == '\'' {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
