//! Prefix ordering for the help listing.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Compare two prefixes the way the help listing sorts them.
///
/// Prefixes are compared on their base letters first, ignoring accents and
/// case, so `é` sorts between `a` and `f`. Ties are broken by accents (the
/// unaccented form first), then by case (lowercase first), and anything still
/// equal falls back to the raw text so the order is total. Symbols keep their
/// code point order.
pub fn compare_prefixes(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

/// Decomposed, lowercased text.
fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

/// [`folded`] without combining marks.
fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    folded(text).filter(|c| !is_combining_mark(*c))
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
