//! Timestamp-derived resource names

use chrono::Local;

/// `{prefix}-{YYYYmmdd-HHMMSS}`. Unique enough not to collide within a
/// single CI run, and sortable by creation time.
pub(crate) fn timestamped(prefix: &str) -> String {
    format!("{}-{}", prefix, Local::now().format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_prefix_plus_timestamp() {
        let name = timestamped("app-build");
        let suffix = name.strip_prefix("app-build-").unwrap();

        // YYYYmmdd-HHMMSS
        assert_eq!(suffix.len(), 15);
        assert_eq!(suffix.as_bytes()[8], b'-');
        assert!(
            suffix
                .chars()
                .enumerate()
                .all(|(i, c)| if i == 8 { c == '-' } else { c.is_ascii_digit() })
        );
    }
}
