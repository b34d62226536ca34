//! Category color assignment
//!
//! Positional palettes come from a fixed curated sequence chosen for
//! readability on the dark dashboard theme. Once a chart has more
//! categories than the curated set, the remainder are random translucent
//! colors. Severity charts use a label-keyed table instead.

use rand::Rng;

use crate::error::{ChartError, Result};

/// Ordered color tokens, one per category
pub type Palette = Vec<String>;

/// Curated high-contrast colors, assigned in this order
pub const CURATED_COLORS: [&str; 12] = [
    "#0d6efd", // Blue
    "#6610f2", // Indigo
    "#6f42c1", // Purple
    "#d63384", // Pink
    "#dc3545", // Red
    "#fd7e14", // Orange
    "#ffc107", // Yellow
    "#198754", // Green
    "#20c997", // Teal
    "#0dcaf0", // Cyan
    "#adb5bd", // Gray
    "#495057", // Dark gray
];

/// Alpha channel of generated overflow colors
pub const OVERFLOW_ALPHA: f64 = 0.7;

/// Color for severities missing from the table
pub const SEVERITY_FALLBACK_COLOR: &str = "#6c757d";

const SEVERITY_COLORS: [(&str, &str); 6] = [
    ("Critical", "#dc3545"),
    ("High", "#fd7e14"),
    ("Medium", "#ffc107"),
    ("Low", "#28a745"),
    ("Informational", "#6c757d"),
    ("Unknown", "#6c757d"),
];

/// Generate exactly `count` colors.
///
/// The first `min(count, 12)` entries are always the curated sequence in
/// order; anything past that is sampled from the thread RNG.
pub fn generate_palette(count: usize) -> Palette {
    generate_palette_with_rng(count, &mut rand::thread_rng())
}

/// Same as [`generate_palette`] but draws overflow colors from `rng`.
pub fn generate_palette_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Palette {
    let mut colors: Palette = CURATED_COLORS
        .iter()
        .take(count)
        .map(|color| color.to_string())
        .collect();

    while colors.len() < count {
        colors.push(random_color(rng));
    }

    colors
}

/// Palette for a signed count, as received from untyped callers.
pub fn palette_for(count: i64) -> Result<Palette> {
    let count = usize::try_from(count).map_err(|_| {
        ChartError::InvalidArgument(format!("palette size must be non-negative, got {}", count))
    })?;
    Ok(generate_palette(count))
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let r: u8 = rng.gen_range(0..255);
    let g: u8 = rng.gen_range(0..255);
    let b: u8 = rng.gen_range(0..255);
    format!("rgba({}, {}, {}, {})", r, g, b, OVERFLOW_ALPHA)
}

/// Look up a severity label. Matching is case-sensitive.
pub fn severity_color(label: &str) -> &'static str {
    SEVERITY_COLORS
        .iter()
        .find(|(severity, _)| *severity == label)
        .map(|(_, color)| *color)
        .unwrap_or(SEVERITY_FALLBACK_COLOR)
}

/// Map each label to its severity color, keeping label order.
pub fn severity_colors<S: AsRef<str>>(labels: &[S]) -> Palette {
    labels
        .iter()
        .map(|label| severity_color(label.as_ref()).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_empty_palette() {
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_curated_prefix_for_small_counts() {
        for count in 0..=CURATED_COLORS.len() {
            let palette = generate_palette(count);
            assert_eq!(palette, CURATED_COLORS[..count].to_vec());

            let unique: HashSet<_> = palette.iter().collect();
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_overflow_colors_are_translucent_rgba() {
        let mut rng = StdRng::seed_from_u64(7);
        let palette = generate_palette_with_rng(20, &mut rng);

        assert_eq!(palette.len(), 20);
        for color in &palette[12..] {
            assert!(color.starts_with("rgba("), "unexpected token {}", color);
            assert!(color.ends_with(", 0.7)"), "unexpected token {}", color);

            let channels: Vec<u32> = color["rgba(".len()..color.len() - ", 0.7)".len()]
                .split(", ")
                .map(|c| c.parse().unwrap())
                .collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|c| *c < 255));
        }
    }

    #[test]
    fn test_seeded_overflow_is_reproducible() {
        let first = generate_palette_with_rng(15, &mut StdRng::seed_from_u64(42));
        let second = generate_palette_with_rng(15, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_count_is_invalid() {
        assert!(matches!(palette_for(-1), Err(ChartError::InvalidArgument(_))));
        assert_eq!(palette_for(3).unwrap(), CURATED_COLORS[..3].to_vec());
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color("Critical"), "#dc3545");
        assert_eq!(severity_color("High"), "#fd7e14");
        assert_eq!(severity_color("Medium"), "#ffc107");
        assert_eq!(severity_color("Low"), "#28a745");
        assert_eq!(severity_color("Informational"), "#6c757d");
        assert_eq!(severity_color("NotARealSeverity"), "#6c757d");
        assert_eq!(severity_color("critical"), SEVERITY_FALLBACK_COLOR);
    }

    #[test]
    fn test_severity_colors_follow_label_order() {
        let colors = severity_colors(&["Low", "Critical", "Bogus"]);
        assert_eq!(colors, vec!["#28a745", "#dc3545", "#6c757d"]);
    }

    proptest! {
        #[test]
        fn prop_palette_length_and_prefix(count in 0usize..64) {
            let palette = generate_palette(count);
            prop_assert_eq!(palette.len(), count);

            let prefix = count.min(CURATED_COLORS.len());
            prop_assert_eq!(&palette[..prefix], &CURATED_COLORS[..prefix]);
        }
    }
}
