//! RFC identifier canonicalization.
//!
//! The canonical form is `rfc<N>`: lower-case, no leading zeros. Catalog rows,
//! cached document file names and remote document URLs are all keyed by it.

/// Namespace prefix of catalog identifiers.
pub const PREFIX: &str = "rfc";

/// Canonicalize a user-supplied RFC identifier.
///
/// `"RFC0091"` becomes `"rfc91"`. A bare number is accepted as well
/// (`"0042"` becomes `"rfc42"`). Input whose remainder is not a number is
/// returned lower-cased but otherwise untouched, so it still yields a
/// best-effort lookup key.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    match number_of(&lowered) {
        Some(n) => format!("{PREFIX}{n}"),
        None => lowered,
    }
}

fn number_of(lowered: &str) -> Option<u64> {
    let remainder = lowered.strip_prefix(PREFIX).unwrap_or(lowered);
    remainder.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_zeros() {
        assert_eq!(normalize("RFC0091"), "rfc91");
    }

    #[test]
    fn test_normalize_canonical_unchanged() {
        assert_eq!(normalize("rfc7540"), "rfc7540");
    }

    #[test]
    fn test_normalize_lenient_fallback() {
        assert_eq!(normalize("notanid"), "notanid");
        assert_eq!(normalize("RFC-Draft"), "rfc-draft");
    }

    #[test]
    fn test_normalize_bare_number() {
        assert_eq!(normalize("0042"), "rfc42");
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize("rfc0000"), "rfc0");
    }

    #[test]
    fn test_normalize_rejects_negative() {
        assert_eq!(normalize("rfc-5"), "rfc-5");
    }

    #[test]
    fn test_normalize_does_not_trim() {
        assert_eq!(normalize(" rfc1 "), " rfc1 ");
    }

    #[test]
    fn test_normalize_beyond_u32() {
        assert_eq!(normalize("rfc004294967296"), "rfc4294967296");
        assert_eq!(normalize("RFC18446744073709551615"), "rfc18446744073709551615");
    }

    #[test]
    fn test_normalize_overflow_falls_back() {
        assert_eq!(normalize("rfc18446744073709551616"), "rfc18446744073709551616");
    }
}
