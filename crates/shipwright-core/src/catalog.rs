// shipwright-core/src/catalog.rs
// ============================================================================
// Module: Validation Catalog
// Description: Static reference data for carriers, services, and label sizes.
// Purpose: Provide pure lookups with case-insensitive, trimmed matching.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The validation catalog holds the closed sets of supported carriers, the
//! services each carrier offers, and the allowed label sizes. Lookups trim
//! surrounding whitespace and ignore ASCII case; the catalog holds no mutable
//! state and has no failure modes beyond returning false.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Closed sets of supported carriers, services, and label sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCatalog {
    /// Carrier names mapped to their supported services.
    carriers: BTreeMap<String, Vec<String>>,
    /// Allowed label sizes.
    label_sizes: Vec<String>,
}

impl ValidationCatalog {
    /// Builds a catalog from explicit carrier and label-size data.
    #[must_use]
    pub const fn new(carriers: BTreeMap<String, Vec<String>>, label_sizes: Vec<String>) -> Self {
        Self {
            carriers,
            label_sizes,
        }
    }

    /// Returns the carrier table keyed by canonical carrier name.
    #[must_use]
    pub const fn carriers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.carriers
    }

    /// Returns the allowed label sizes.
    #[must_use]
    pub fn label_sizes(&self) -> &[String] {
        &self.label_sizes
    }

    /// Returns whether the carrier is supported.
    #[must_use]
    pub fn is_valid_carrier(&self, name: &str) -> bool {
        self.services_for(name).is_some()
    }

    /// Returns the supported services for a carrier, when known.
    #[must_use]
    pub fn services_for(&self, carrier: &str) -> Option<&[String]> {
        let wanted = carrier.trim();
        self.carriers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, services)| services.as_slice())
    }

    /// Returns whether the carrier supports the service.
    #[must_use]
    pub fn is_valid_service(&self, carrier: &str, service: &str) -> bool {
        let wanted = service.trim();
        self.services_for(carrier)
            .is_some_and(|services| services.iter().any(|known| known.eq_ignore_ascii_case(wanted)))
    }

    /// Returns whether the label size is allowed.
    #[must_use]
    pub fn is_valid_label_size(&self, size: &str) -> bool {
        let wanted = size.trim();
        self.label_sizes.iter().any(|known| known.eq_ignore_ascii_case(wanted))
    }

    /// Returns the carrier names joined for error messages.
    #[must_use]
    pub fn carrier_names(&self) -> String {
        self.carriers.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl Default for ValidationCatalog {
    fn default() -> Self {
        let mut carriers = BTreeMap::new();
        carriers.insert(
            "FedEx".to_string(),
            vec!["Overnight".to_string(), "Air".to_string()],
        );
        carriers.insert("UPS".to_string(), vec!["Ground".to_string(), "2Day".to_string()]);
        Self {
            carriers,
            label_sizes: vec!["4x6".to_string(), "6x9".to_string()],
        }
    }
}
