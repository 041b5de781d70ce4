//! Sparse updates
//!
//! A restore write only carries the fields the backup record actually has, so
//! settings the backup never captured keep their current value on the target.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{NetsnapError, NetsnapResult};

/// Field name to value map sent as a partial-update request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SparseUpdate {
    fields: Map<String, Value>,
}

impl SparseUpdate {
    /// An update touching nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the `allowed` fields that are present and non-null in `record`
    pub fn from_record<T: Serialize>(record: &T, allowed: &[&str]) -> NetsnapResult<Self> {
        let value = serde_json::to_value(record)?;
        let Value::Object(source) = value else {
            return Err(NetsnapError::Validation(
                "sparse update source is not a JSON object".into(),
            ));
        };

        let mut fields = Map::new();
        for name in allowed {
            match source.get(*name) {
                Some(Value::Null) | None => {}
                Some(v) => {
                    fields.insert((*name).to_string(), v.clone());
                }
            }
        }
        Ok(Self { fields })
    }

    /// Set one field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Whether the update touches no field
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of one field, if set
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Names of the fields being set
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The request body
    pub fn into_body(self) -> Value {
        Value::Object(self.fields)
    }
}
