pub mod catalog;
pub mod error;
pub mod ids;
pub mod integrity;
pub mod options;

pub use catalog::{Catalog, CatalogBuilder, CatalogSummary};
pub use error::{ModelError, Result};
pub use ids::{SENTINEL, Selection, ValueId};
pub use integrity::{
    IntegrityIssue, IntegrityReport, IssueKind, IssueSeverity, single_option_cycles,
    validate_catalog,
};
pub use options::{DEFAULT_PLACEHOLDER_IMAGE, DisplayOptions};

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ValueId {
        ValueId::new(value).expect("valid id")
    }

    #[test]
    fn value_id_trims_and_rejects_sentinel() {
        assert_eq!(id("  kotegaeshi ").as_str(), "kotegaeshi");
        assert_eq!(ValueId::new("   "), Err(ModelError::EmptyValueId));
        assert!(matches!(
            ValueId::new("-----"),
            Err(ModelError::SentinelValueId(_))
        ));
    }

    #[test]
    fn selection_parses_sentinel() {
        assert_eq!(Selection::parse("-----").unwrap(), Selection::Unselected);
        assert_eq!(
            Selection::parse("iriminage").unwrap(),
            Selection::Value(id("iriminage"))
        );
        assert_eq!(Selection::Unselected.to_string(), SENTINEL);
    }

    #[test]
    fn large_variant_replaces_first_marker_only() {
        let options = DisplayOptions::default();
        assert_eq!(
            options.large_variant("images/shomen_s.png"),
            "images/shomen_m.png"
        );
        assert_eq!(
            options.large_variant("images/a_s.b_s.png"),
            "images/a_m.b_s.png"
        );
        assert_eq!(options.large_variant("images/plain.png"), "images/plain.png");
    }

    #[test]
    fn empty_transition_list_is_terminal() {
        let catalog = Catalog::builder()
            .initial([id("A")])
            .transition(id("A"), [id("B")])
            .transition(id("B"), [])
            .build();
        assert!(!catalog.is_terminal("A"));
        assert!(catalog.is_terminal("B"));
        assert!(catalog.is_terminal("unknown"));
        assert_eq!(catalog.next("B"), Some(&[][..]));
        assert_eq!(catalog.next("unknown"), None);
    }
}
