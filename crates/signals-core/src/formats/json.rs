//! JSON representation of the catalogue and the field weight table.
//!
//! Catalogue: an array of `{id, course_name, category, phase, credits}`.
//!
//! Field table: an object of objects, `{"Field": {"Category": weight}}`.
//! Object key order is significant and is preserved on both read and write.

use crate::catalogue::{Catalogue, Category, CourseCatalogue, CourseRecord};
use crate::error::FormatError;
use crate::fields::{CategoryWeight, FieldProfile, FieldWeightTable, FieldWeights};
use serde_json::{Map, Value};

/// Parse and validate a catalogue.
pub fn catalogue_from_json(input: &str) -> Result<Catalogue, FormatError> {
    let records: Vec<CourseRecord> = serde_json::from_str(input)?;
    Ok(Catalogue::new(records)?)
}

/// Serialize a catalogue as a pretty-printed JSON array.
pub fn catalogue_to_json(catalogue: &Catalogue) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(catalogue.list())?)
}

/// Parse and validate a field weight table.
pub fn field_weights_from_json(input: &str) -> Result<FieldWeights, FormatError> {
    let root: Value = serde_json::from_str(input)?;
    let Value::Object(fields) = root else {
        return Err(FormatError::Shape {
            expected: "an object of fields",
            location: "top level".to_string(),
        });
    };

    let mut profiles = Vec::with_capacity(fields.len());
    for (name, weights) in fields {
        let Value::Object(weights) = weights else {
            return Err(FormatError::Shape {
                expected: "an object of category weights",
                location: format!("field '{name}'"),
            });
        };

        let mut parsed = Vec::with_capacity(weights.len());
        for (category, weight) in weights {
            let Some(weight) = weight.as_f64() else {
                return Err(FormatError::Shape {
                    expected: "a numeric weight",
                    location: format!("field '{name}', category '{category}'"),
                });
            };
            parsed.push(CategoryWeight {
                category: category.parse::<Category>()?,
                weight,
            });
        }

        profiles.push(FieldProfile {
            name,
            weights: parsed,
        });
    }

    Ok(FieldWeights::new(profiles)?)
}

/// Serialize a field weight table as a pretty-printed JSON object.
pub fn field_weights_to_json<F: FieldWeightTable>(fields: &F) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&field_weights_value(fields))?)
}

/// The field weight table as a JSON value, in table order.
pub fn field_weights_value<F: FieldWeightTable>(fields: &F) -> Value {
    let mut root = Map::new();
    for profile in fields.entries() {
        let weights: Map<String, Value> = profile
            .weights
            .iter()
            .map(|w| (w.category.as_str().to_string(), Value::from(w.weight)))
            .collect();
        root.insert(profile.name.clone(), Value::Object(weights));
    }
    Value::Object(root)
}

// =============================================================================
// TESTS
// =============================================================================
