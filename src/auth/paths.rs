//! Path-exclusion matching.

const WILDCARD: char = '*';

fn with_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Returns `true` when `path` is not covered by any of `excluded_paths`.
///
/// A missing path or an empty exclusion list always requires authentication.
/// Patterns ending in `*` match by prefix, others must match exactly; both
/// sides are compared with a single trailing slash. The first match wins.
#[must_use]
pub fn require_auth<S: AsRef<str>>(path: Option<&str>, excluded_paths: Option<&[S]>) -> bool {
    let Some(path) = path else {
        return true;
    };

    let Some(excluded_paths) = excluded_paths.filter(|paths| !paths.is_empty()) else {
        return true;
    };

    let path = with_trailing_slash(path);

    !excluded_paths.iter().any(|excluded| {
        let excluded = with_trailing_slash(excluded.as_ref());
        match excluded
            .strip_suffix('/')
            .and_then(|pattern| pattern.strip_suffix(WILDCARD))
        {
            Some(prefix) => path.starts_with(prefix),
            None => path == excluded,
        }
    })
}
