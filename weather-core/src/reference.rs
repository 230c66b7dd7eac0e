//! Static reference data bundled with the binary: countries and the
//! placeholder conditions shown before the first search.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::model::{LabelAndValue, RandomCondition};

const COUNTRIES_JSON: &str = include_str!("../assets/countries.json");
const CONDITIONS_JSON: &str = include_str!("../assets/conditions.json");

/// Loaded once; label/code maps are built at construction and never change.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    countries: Vec<LabelAndValue>,
    conditions: Vec<RandomCondition>,
    code_by_label: HashMap<String, String>,
    label_by_code: HashMap<String, String>,
}

impl ReferenceData {
    pub fn new(countries: Vec<LabelAndValue>, conditions: Vec<RandomCondition>) -> Self {
        let mut code_by_label = HashMap::with_capacity(countries.len());
        let mut label_by_code = HashMap::with_capacity(countries.len());

        // First entry wins on duplicates, matching a linear find.
        for c in &countries {
            code_by_label.entry(c.label.clone()).or_insert_with(|| c.value.clone());
            label_by_code.entry(c.value.clone()).or_insert_with(|| c.label.clone());
        }

        Self {
            countries,
            conditions,
            code_by_label,
            label_by_code,
        }
    }

    /// Data embedded at build time.
    pub fn bundled() -> Result<Self> {
        let countries: Vec<LabelAndValue> =
            serde_json::from_str(COUNTRIES_JSON).context("Failed to parse bundled countries")?;
        let conditions: Vec<RandomCondition> =
            serde_json::from_str(CONDITIONS_JSON).context("Failed to parse bundled conditions")?;

        Ok(Self::new(countries, conditions))
    }

    pub fn countries(&self) -> &[LabelAndValue] {
        &self.countries
    }

    /// Options for a country picker: the label doubles as the value.
    pub fn countries_for_combo_box(&self) -> Vec<LabelAndValue> {
        self.countries
            .iter()
            .map(|c| LabelAndValue {
                label: c.label.clone(),
                value: c.label.clone(),
            })
            .collect()
    }

    pub fn country_code_from_label(&self, label: &str) -> Option<&str> {
        self.code_by_label.get(label).map(String::as_str)
    }

    /// Empty string when the code is unknown.
    pub fn label_from_country_code(&self, code: &str) -> &str {
        self.label_by_code
            .get(code)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn random_condition(&self) -> RandomCondition {
        self.conditions
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}
