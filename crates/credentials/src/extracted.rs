use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::{Field, mask::display_value};

/// Raw credential values taken from request headers, keyed by field.
///
/// Values are stored exactly as received. Iteration follows the header table order.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedCredentials(BTreeMap<Field, String>);

impl ExtractedCredentials {
    /// The raw value of a field, if its header was present.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Number of extracted fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the extracted fields and their raw values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub(crate) fn insert(&mut self, field: Field, value: String) {
        self.0.insert(field, value);
    }
}

impl FromIterator<(Field, String)> for ExtractedCredentials {
    fn from_iter<T: IntoIterator<Item = (Field, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for ExtractedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();

        for (field, value) in &self.0 {
            map.entry(&field.as_str(), &display_value(*field, value));
        }

        map.finish()
    }
}
