//! # Field Weight Table
//!
//! Maps each career field to the categories that feed it and their weights.
//!
//! Both the field list and each field's category list keep their declared
//! order; contributor lists and tie-breaking follow it.

use crate::catalogue::Category;
use crate::error::FieldTableError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One category's share of a field score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    pub weight: f64,
}

/// A career field and its ordered category weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProfile {
    pub name: String,
    pub weights: Vec<CategoryWeight>,
}

impl FieldProfile {
    /// Create a profile from `(category, weight)` pairs.
    pub fn new(name: impl Into<String>, weights: &[(Category, f64)]) -> Self {
        Self {
            name: name.into(),
            weights: weights
                .iter()
                .map(|&(category, weight)| CategoryWeight { category, weight })
                .collect(),
        }
    }

    /// The full set of categories this field requires.
    #[must_use]
    pub fn required_categories(&self) -> BTreeSet<Category> {
        self.weights.iter().map(|w| w.category).collect()
    }

    /// Weight for `category`, if the field references it.
    #[must_use]
    pub fn weight_of(&self, category: Category) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.category == category)
            .map(|w| w.weight)
    }
}

/// Read-only access to a field weighting table.
pub trait FieldWeightTable {
    /// All fields in table order.
    fn entries(&self) -> &[FieldProfile];

    /// Look up a field by name.
    fn field(&self, name: &str) -> Option<&FieldProfile> {
        self.entries().iter().find(|f| f.name == name)
    }
}

/// Validated, ordered field weighting table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWeights {
    fields: Vec<FieldProfile>,
}

impl FieldWeights {
    /// Build a table, rejecting empty or duplicate fields, duplicate
    /// categories within a field and non-positive weights.
    pub fn new(fields: Vec<FieldProfile>) -> Result<Self, FieldTableError> {
        let mut seen = BTreeSet::new();

        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(FieldTableError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FieldTableError::DuplicateField(field.name.clone()));
            }
            if field.weights.is_empty() {
                return Err(FieldTableError::NoWeights(field.name.clone()));
            }

            let mut categories = BTreeSet::new();
            for w in &field.weights {
                if !w.weight.is_finite() || w.weight <= 0.0 {
                    return Err(FieldTableError::InvalidWeight {
                        field: field.name.clone(),
                        category: w.category,
                        weight: w.weight,
                    });
                }
                if !categories.insert(w.category) {
                    return Err(FieldTableError::DuplicateCategory {
                        field: field.name.clone(),
                        category: w.category,
                    });
                }
            }
        }

        Ok(Self { fields })
    }

    /// The built-in career field table.
    #[must_use]
    pub fn builtin() -> Self {
        use Category::{
            Business, BusinessIntelligence, Communication, Data, HandsOn, Programming, Security,
        };

        Self {
            fields: vec![
                FieldProfile::new(
                    "Data Science",
                    &[(Data, 0.5), (Programming, 0.3), (Business, 0.2)],
                ),
                FieldProfile::new("Data Analytics", &[(Data, 0.6), (Business, 0.4)]),
                FieldProfile::new(
                    "Software Development",
                    &[(Programming, 0.6), (Data, 0.2), (HandsOn, 0.2)],
                ),
                FieldProfile::new("Cybersecurity", &[(Security, 0.7), (Programming, 0.3)]),
                FieldProfile::new(
                    "Business Intelligence",
                    &[(BusinessIntelligence, 0.5), (Data, 0.3), (Business, 0.2)],
                ),
                FieldProfile::new(
                    "IT Management",
                    &[(Business, 0.4), (Communication, 0.3), (Security, 0.3)],
                ),
                FieldProfile::new(
                    "Governance, Risk & Compliance",
                    &[(Security, 0.5), (Business, 0.3), (Communication, 0.2)],
                ),
            ],
        }
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the table has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldWeightTable for FieldWeights {
    fn entries(&self) -> &[FieldProfile] {
        &self.fields
    }
}

// =============================================================================
// TESTS
// =============================================================================
