//! Category display colors for spreadsheet reporting.
//!
//! The palette matches the legacy report template, so regraded exports
//! diff cleanly against historical sheets. The map is total: every
//! category, including the Unclassifiable sentinel, has a stable color
//! token.

use crate::model::Category;

/// Display color for a grade, as a `#RRGGBB` token.
pub const fn color_for(category: Category) -> &'static str {
    match category {
        Category::I => "#CFFFFF",
        Category::II => "#8FFFFF",
        Category::III => "#7FFF7F",
        Category::IV => "#FFFF6F",
        Category::V => "#FFC000",
        Category::WorseThanV => "#FF0000",
        // Neutral fill for ungraded cells, distinct from every grade.
        Category::Unclassifiable => "#D9D9D9",
    }
}

/// The full category-to-color mapping, exposed for collaborators that
/// iterate the palette (legend rendering, cell styling).
pub static CATEGORY_COLORS: [(Category, &str); 7] = [
    (Category::I, color_for(Category::I)),
    (Category::II, color_for(Category::II)),
    (Category::III, color_for(Category::III)),
    (Category::IV, color_for(Category::IV)),
    (Category::V, color_for(Category::V)),
    (Category::WorseThanV, color_for(Category::WorseThanV)),
    (Category::Unclassifiable, color_for(Category::Unclassifiable)),
];

/// Opaque ARGB fill token ("FFRRGGBB") for spreadsheet cell styling.
/// Spreadsheet fills want uppercase hex with an explicit alpha channel
/// and no leading '#'.
pub fn fill_argb(category: Category) -> String {
    let hex = color_for(category).trim_start_matches('#');
    format!("FF{}", hex.to_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_is_total_over_all_categories() {
        assert_eq!(CATEGORY_COLORS.len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(
                CATEGORY_COLORS.iter().any(|(c, _)| *c == category),
                "category {:?} missing from CATEGORY_COLORS",
                category
            );
        }
    }

    #[test]
    fn test_colors_are_well_formed_hex_tokens() {
        for (category, color) in &CATEGORY_COLORS {
            assert!(
                color.len() == 7
                    && color.starts_with('#')
                    && color[1..].chars().all(|c| c.is_ascii_hexdigit()),
                "color for {:?} is malformed: {:?}",
                category,
                color
            );
        }
    }

    #[test]
    fn test_colors_are_distinct_per_category() {
        let mut seen = std::collections::HashSet::new();
        for (category, color) in &CATEGORY_COLORS {
            assert!(
                seen.insert(*color),
                "color {:?} for {:?} is reused by another category",
                color,
                category
            );
        }
    }

    #[test]
    fn test_fill_argb_is_opaque_uppercase() {
        assert_eq!(fill_argb(Category::V), "FFFFC000");
        assert_eq!(fill_argb(Category::I), "FFCFFFFF");
        for category in Category::ALL {
            let argb = fill_argb(category);
            assert_eq!(argb.len(), 8);
            assert!(argb.starts_with("FF"));
            assert!(argb.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
