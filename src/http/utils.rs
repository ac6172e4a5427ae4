//! Helpers for the transport startup checks.

use std::cmp::Ordering;

/// Returns `true` when `found` is the same as or newer than `minimum`.
///
/// Versions are compared component by component as dotted numbers; missing
/// components count as zero and any non-numeric suffix of a component
/// (`"0-beta"`, `"4+git"`) is ignored. `"0.12"` therefore equals `"0.12.0"`.
///
/// # Example
///
/// ```rust
/// use paygate_http::http::utils::version_at_least;
///
/// assert!(version_at_least("0.12.5", "0.12"));
/// assert!(!version_at_least("0.11.27", "0.12.0"));
/// ```
pub fn version_at_least(found: &str, minimum: &str) -> bool {
    compare_versions(found, minimum) != Ordering::Less
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = components(a);
    let b = components(b);
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn components(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_satisfy_floor() {
        assert!(version_at_least("7.34.0", "7.34.0"));
        assert!(version_at_least("0.12", "0.12.0"));
    }

    #[test]
    fn newer_versions_satisfy_floor() {
        assert!(version_at_least("7.88.1", "7.34.0"));
        assert!(version_at_least("1.0", "0.12"));
        assert!(version_at_least("0.12.10", "0.12.9"));
    }

    #[test]
    fn older_versions_fail_floor() {
        assert!(!version_at_least("7.29.0", "7.34.0"));
        assert!(!version_at_least("0.11.27", "0.12"));
    }

    #[test]
    fn suffixes_are_ignored() {
        assert!(version_at_least("0.12.0-beta.1", "0.12"));
        assert!(!version_at_least("garbage", "0.1"));
    }
}
