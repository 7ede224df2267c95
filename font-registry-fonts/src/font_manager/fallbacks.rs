//! Default fallback families.
//!
//! Used when a requested font is unavailable and the configuration does not
//! list its own fallback families.

/// Fallback font families in priority order.
///
/// The order is designed to provide:
/// 1. The platform UI sans-serif face
/// 2. Widely installed cross-platform sans-serif families
/// 3. CJK coverage
/// 4. The generic `sans-serif` family, which fontdb maps to whatever the
///    platform configures
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Platform UI fonts
    "SF Pro Text",
    "Helvetica Neue",
    "Segoe UI",
    "Roboto",
    "Cantarell",
    // Common cross-platform families
    "Noto Sans",
    "Helvetica",
    "Arial",
    "DejaVu Sans",
    "Liberation Sans",
    // CJK fonts
    "Noto Sans CJK JP",
    "Noto Sans CJK SC",
    "PingFang SC",
    "Microsoft YaHei",
    // Generic family, always last
    "sans-serif",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_family_is_last() {
        assert_eq!(FALLBACK_FAMILIES.last(), Some(&"sans-serif"));
    }

    #[test]
    fn test_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for family in FALLBACK_FAMILIES {
            assert!(seen.insert(family), "duplicate fallback family: {family}");
        }
    }
}
