//! Client-side search over the loaded advocates.
//!
//! A record matches when the trimmed, lower-cased query is a substring of its
//! first name, last name, city, degree or space-joined specialties.

use crate::domain::advocate::Advocate;

/// Trims and lower-cases a raw search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn contains_folded(field: Option<&str>, needle: &str) -> bool {
    field.unwrap_or_default().to_lowercase().contains(needle)
}

/// Whether `advocate` matches an already normalized query.
pub fn matches_normalized(advocate: &Advocate, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    contains_folded(advocate.first_name.as_deref(), needle)
        || contains_folded(advocate.last_name.as_deref(), needle)
        || contains_folded(advocate.city.as_deref(), needle)
        || contains_folded(advocate.degree.as_deref(), needle)
        || advocate
            .specialties
            .join(" ")
            .to_lowercase()
            .contains(needle)
}

/// Advocates from `dataset` matching `query`, in their original order.
pub fn filtered_view(dataset: &[Advocate], query: &str) -> Vec<Advocate> {
    let needle = normalize_query(query);
    filter_normalized(dataset, &needle)
}

pub(crate) fn filter_normalized(dataset: &[Advocate], needle: &str) -> Vec<Advocate> {
    dataset
        .iter()
        .filter(|advocate| matches_normalized(advocate, needle))
        .cloned()
        .collect()
}
