//! Display metadata derived from filenames.
//!
//! The gallery has no sidecar files or embedded metadata: every human-facing
//! string in the manifest comes from the image's base name and its
//! collection folder.
//!
//! ## Display Titles
//!
//! Separators (`-`, `_`) become spaces, then the result is title-cased: the
//! first letter of every alphabetic run is upper-cased, the rest lower-cased.
//! Digits and punctuation break runs, so `2nd` becomes `2Nd`.
//!
//! - `sunset` → "Sunset"
//! - `golden_hour-02` → "Golden Hour 02"
//! - `IMG_0046` → "Img 0046"

const SEPARATORS: &[char] = &['-', '_'];

/// Title for an image base name.
pub fn display_title(base_name: &str) -> String {
    title_case(&base_name.replace(SEPARATORS, " "))
}

/// Title-case a string: upper-case letters that start an alphabetic run,
/// lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Accessibility text for an image: `"{title} - {collection}"`.
pub fn alt_text(title: &str, collection: &str) -> String {
    format!("{title} - {collection}")
}

/// Public URL of a file inside a collection folder.
///
/// Segments are joined with `/` verbatim, so a relative `source_root` such
/// as `../assets/wallpapers` is kept as-is and resolved by the browser.
pub fn public_path(url_prefix: &str, source_root: &str, collection: &str, filename: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        url_prefix.trim_end_matches('/'),
        source_root.trim_matches('/'),
        collection,
        filename
    )
}
