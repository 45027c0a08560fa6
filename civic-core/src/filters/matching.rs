use std::collections::HashSet;

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Dropdown equality on lower-cased values.
///
/// `selected == None` means "all" and matches any value, including a
/// missing one. A concrete selection never matches a missing value.
pub fn equals_ignore_case(value: Option<&str>, selected: Option<&str>) -> bool {
    match (selected, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(selected), Some(value)) => value.to_lowercase() == selected.to_lowercase(),
    }
}

/// Maps a raw dropdown value to a selection: blank and `"all"` mean no constraint.
pub fn normalize_selection(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Distinct non-empty values of `field`, in order of first appearance.
///
/// Records arrive ordered by id, so the options follow that order too.
pub fn unique_values<'a, T, F>(records: &'a [T], field: F) -> Vec<String>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(field)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
