use once_cell::sync::Lazy;
use regex::Regex;

/// Longest slug the lookup endpoint accepts.
pub const MAX_SLUG_LEN: usize = 500;

static SLUG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]{1,500}$").expect("slug shape regex"));

// Applied after lowercasing, so anything outside ASCII word characters,
// whitespace and hyphens is dropped.
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("non-slug regex"));

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").expect("separator regex"));

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("hyphen regex"));

/// Derives the URL slug for a title.
///
/// ```
/// use eventful_server::normalize::derive_slug;
/// assert_eq!(derive_slug("  Rust & WebAssembly: Day 1 "), "rust-webassembly-day-1");
/// ```
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATORS.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");

    let slug = collapsed.trim_matches('-');
    if slug.len() <= MAX_SLUG_LEN {
        return slug.to_string();
    }

    // Only ASCII survives the stripping above, so byte slicing is safe.
    slug[..MAX_SLUG_LEN].trim_end_matches('-').to_string()
}

/// Whether `slug` has the shape the lookup endpoint accepts.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_SHAPE.is_match(slug)
}
