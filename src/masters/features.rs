//! Kerning and OpenType features for the alternate glyphs
//!
//! Alternates must kern exactly like the glyph they replace, so every pair
//! involving a processed glyph is repeated for each alternate suffix on the
//! first side, the second side and both. Group names are left alone.

use std::collections::BTreeMap;

pub const BOUNDS_SUFFIX: &str = ".bounds";
pub const FILLED_SUFFIX: &str = ".filled";
pub const BOUNDS_FILLED_SUFFIX: &str = ".bounds.filled";
pub const ALTERNATE_SUFFIXES: [&str; 3] = [BOUNDS_SUFFIX, FILLED_SUFFIX, BOUNDS_FILLED_SUFFIX];

pub type Kerning = BTreeMap<(String, String), f64>;

/// `kerning` plus copies of each pair for the alternates of `is_glyph` sides
pub fn duplicate_kerning(kerning: &Kerning, is_glyph: impl Fn(&str) -> bool) -> Kerning {
    let mut duplicated = kerning.clone();
    for ((first, second), value) in kerning {
        let first_is_glyph = is_glyph(first);
        let second_is_glyph = is_glyph(second);
        for suffix in ALTERNATE_SUFFIXES {
            let first_alternate = format!("{first}{suffix}");
            let second_alternate = format!("{second}{suffix}");
            if first_is_glyph {
                duplicated.insert((first_alternate.clone(), second.clone()), *value);
            }
            if second_is_glyph {
                duplicated.insert((first.clone(), second_alternate.clone()), *value);
            }
            if first_is_glyph && second_is_glyph {
                duplicated.insert((first_alternate, second_alternate), *value);
            }
        }
    }
    duplicated
}

/// `ss01` swaps glyphs for their bounding box versions, `ss02` for their
/// filled versions.
pub fn stylistic_sets<S: AsRef<str>>(glyph_names: &[S]) -> String {
    let names = || glyph_names.iter().map(AsRef::as_ref);

    let mut lines = vec![
        "feature ss01 {".to_string(),
        "    featureNames { name \"Glyph's Bounding Box\"; };".to_string(),
    ];
    lines.extend(names().map(|name| format!("    sub {name} by {name}{BOUNDS_SUFFIX};")));
    lines.push("} ss01;".to_string());
    lines.push(String::new());

    lines.push("feature ss02 {".to_string());
    lines.push("    featureNames { name \"Filled Glyph\"; };".to_string());
    for name in names() {
        lines.push(format!("    sub {name} by {name}{FILLED_SUFFIX};"));
        lines.push(format!("    sub {name}{BOUNDS_SUFFIX} by {name}{BOUNDS_FILLED_SUFFIX};"));
    }
    lines.push("} ss02;".to_string());

    let mut fea = lines.join("\n");
    fea.push('\n');
    fea
}

/// Source feature code followed by the stylistic sets
pub fn master_features<S: AsRef<str>>(source_features: &str, glyph_names: &[S]) -> String {
    let source = source_features.trim_end();
    let sets = stylistic_sets(glyph_names);
    if source.is_empty() {
        sets
    } else {
        format!("{source}\n\n{sets}")
    }
}
