//! Ordered rule tables for permit enrichment.
//!
//! Both tables are evaluated strictly in declaration order; the
//! classification precedence in particular is load-bearing (the
//! demolition rule must win before the construction+demolition
//! combination is ever considered).

use permits_etl_shared::ApplicationClass;

/// Label keyword table: label -> trigger words, matched
/// case-insensitively as substrings of the description.
pub const LABEL_RULES: &[(&str, &[&str])] = &[
    ("pool", &["pool", "spa", "hot tub"]),
    ("garage", &["garage"]),
    ("deck", &["deck"]),
    ("plumbing", &["plumbing"]),
    ("basement", &["basement"]),
    ("roofing", &["roof", "roofing"]),
    ("solar", &["solar"]),
    ("shed", &["shed"]),
    ("porch", &["porch"]),
    ("fireplace", &["fireplace"]),
    ("addition", &["addition", "extension"]),
    ("rowhouse", &["rowhouse"]),
    ("stacked_dwelling", &["stacked dwelling", "stacked"]),
    ("tenant_fitup", &["tenant fit", "fit-up", "fitup"]),
];

/// One classification rule: a predicate over the lowercased
/// application type and the extracted labels, and the class assigned
/// when it matches.
pub struct ClassificationRule {
    pub matches: fn(application_type: &str, labels: &[String]) -> bool,
    pub class: ApplicationClass,
}

fn has_label(labels: &[String], label: &str) -> bool {
    labels.iter().any(|l| l == label)
}

fn is_demolition(application_type: &str, labels: &[String]) -> bool {
    application_type.contains("demolition") || has_label(labels, "demolition")
}

fn is_renovation(application_type: &str, labels: &[String]) -> bool {
    application_type.contains("interior alteration") || has_label(labels, "renovation")
}

fn is_destruct_construct(application_type: &str, labels: &[String]) -> bool {
    application_type.contains("construction") && has_label(labels, "demolition")
}

/// Classification rules, evaluated in order; the first match wins.
///
/// The order is load-bearing: the demolition rule must be evaluated
/// before the construction+demolition combination. That combination
/// requires a demolition label, which rule one already catches, so
/// rule three cannot match once rule one has failed; it stays in this
/// position because reordering would change the output distribution.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        matches: is_demolition,
        class: ApplicationClass::Demolition,
    },
    ClassificationRule {
        matches: is_renovation,
        class: ApplicationClass::Renovation,
    },
    ClassificationRule {
        matches: is_destruct_construct,
        class: ApplicationClass::DestructConstruct,
    },
];

/// Catch-all class when no rule matches.
pub const DEFAULT_CLASS: ApplicationClass = ApplicationClass::Construction;
