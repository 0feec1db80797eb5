use std::sync::OnceLock;

use regex::Regex;

/// Picks a display color for an item that has no explicit `#color`.
pub trait ColorClassifier {
    fn color_for(&self, model: &str) -> String;
}

/// Default colors keyed on well-known vendor and equipment names in the model.
///
/// Every rule is tested in order and a later match overrides an earlier one,
/// so the last matching rule decides.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelColorRules;

struct ColorRule {
    pattern: Regex,
    color: &'static str,
}

impl ModelColorRules {
    pub const DEFAULT: &'static str = "#888";
    pub const EMPTY_MODEL: &'static str = "#FFF";

    const RULES: &'static [(&'static str, &'static str)] = &[
        (r"(wire|cable)\s*guide|pdu|patch|term server|lcd", "#bba"),
        (r"blank", "#fff"),
        (r"netapp|fas\d", "#07c"),
        (r"^Sh(elf)?\s", "#0AE"),
        (r"cisco|catalyst|nexus", "#F80"),
        (r"brocade|mds", "#8F0"),
        (r"ucs", "#c00"),
        (r"ibm", "#67A"),
        (r"hp", "#A67"),
    ];

    fn rules() -> &'static [ColorRule] {
        static RULES: OnceLock<Vec<ColorRule>> = OnceLock::new();
        RULES.get_or_init(|| {
            Self::RULES
                .iter()
                .map(|(pattern, color)| ColorRule {
                    pattern: Regex::new(&format!("(?i){pattern}")).expect("Invalid color rule regex"),
                    color,
                })
                .collect()
        })
    }
}

impl ColorClassifier for ModelColorRules {
    fn color_for(&self, model: &str) -> String {
        if model.is_empty() {
            return Self::EMPTY_MODEL.to_string();
        }

        Self::rules()
            .iter()
            .rfind(|rule| rule.pattern.is_match(model))
            .map_or(Self::DEFAULT, |rule| rule.color)
            .to_string()
    }
}
