//! Slug derivation for post titles and tags.
//!
//! A slug is lowercase ASCII alphanumeric text with every run of other
//! characters collapsed into a single hyphen and no leading or trailing
//! hyphens. Non-ASCII letters are transliterated first, so "Café" becomes
//! "cafe".

/// Derive a slug from free text.
///
/// # Examples
/// ```
/// use postms::domain::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust  2024 "), "rust-2024");
/// assert_eq!(slugify("Café Déjà"), "cafe-deja");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

/// Slugify each tag and drop empties and repeats, keeping first occurrences.
#[must_use]
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let slug = slugify(tag.as_ref());
        if !slug.is_empty() && !normalized.contains(&slug) {
            normalized.push(slug);
        }
    }
    normalized
}
