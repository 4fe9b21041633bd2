//! The filter contract.

/// A named, pure transform over an asset content buffer.
///
/// Implementations must be deterministic and free of side effects on their
/// input: the same bytes in always produce the same bytes out. Content
/// hashes computed after filtering depend on this.
pub trait Filter {
    /// Stable identifier used for registry lookup and configuration.
    fn name(&self) -> &str;

    /// Asset kinds this filter applies to (e.g. `["css"]`).
    fn kinds(&self) -> &[&str];

    /// Transforms the buffer, returning the replacement content.
    fn apply(&self, input: &[u8]) -> Vec<u8>;

    /// Returns whether this filter is scoped to the given kind.
    fn applies_to(&self, kind: &str) -> bool {
        self.kinds().contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Filter for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn kinds(&self) -> &[&str] {
            &["css", "js"]
        }

        fn apply(&self, input: &[u8]) -> Vec<u8> {
            input.to_ascii_uppercase()
        }
    }

    #[test]
    fn applies_to_listed_kinds_only() {
        let f = Upper;
        assert!(f.applies_to("css"));
        assert!(f.applies_to("js"));
        assert!(!f.applies_to("html"));
    }

    #[test]
    fn apply_transforms_buffer() {
        let f = Upper;
        assert_eq!(f.apply(b"abc"), b"ABC");
    }
}
