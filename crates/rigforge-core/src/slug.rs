//! # Slug Derivation
//!
//! Deterministic URL-safe slugs for category names.
//!
//! ## Rules
//! 1. Lowercase
//! 2. Fold accented Latin letters to their ASCII base ("é" -> "e")
//! 3. Every other non-alphanumeric character becomes a hyphen
//! 4. Runs of hyphens collapse to one; leading/trailing hyphens are trimmed
//!
//! The function is idempotent: slugifying a slug yields the same slug.
//! A category's slug is recomputed whenever its name changes, so slug
//! uniqueness mirrors name uniqueness.

/// Folds one accented Latin character to its ASCII base, lowercased.
///
/// Characters outside the folding table are returned unchanged (still
/// lowercased); non-alphanumerics are handled by the caller.
fn fold_char(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' | 'í' | 'ì' => 'i',
        'ô' | 'ö' | 'ó' | 'ò' | 'õ' => 'o',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ÿ' => 'y',
        other => other,
    }
}

/// Derives a slug from a display name.
///
/// ## Example
/// ```rust
/// use rigforge_core::slug::slugify;
///
/// assert_eq!(slugify("Carte graphique (GPU)"), "carte-graphique-gpu");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let c = fold_char(c);
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            // Collapse any run of separators into a single hyphen,
            // dropped entirely at the start and end.
            pending_hyphen = true;
        }
    }

    slug
}

// =============================================================================
// Unit Tests
// =============================================================================
