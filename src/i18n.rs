//! Translation catalogue.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DISCOUNT_APPLIED: &str = "DISCOUNT_APPLIED";

/// Flat key to template catalogue, as served from `/i18n/{language}.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    pub fn new(entries: HashMap<String, String>) -> Self { Self(entries) }

    /// Looks up `key` and fills `{{name}}` placeholders. Unknown keys come back as-is.
    pub fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.0.get(key) else { return key.to_string() };
        params.iter().fold(template.clone(), |acc, (name, value)| {
            acc.replace(&format!("{{{{{}}}}}", name), value)
        })
    }
}
