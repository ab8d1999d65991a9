use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{parse_json_value, to_json_value, DataError};

/// Tagged key/value compound, nesting permitted.
///
/// Values live as JSON values, so any serde type can be stored under a tag,
/// while typed accessors cover the shapes the simulation persists most:
/// integers, strings, booleans, int arrays, nested compounds and lists of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    tags: Map<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.tags.keys()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.tags.remove(key).is_some()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, DataError> {
        let value = self.tags.get(key).ok_or_else(|| DataError::TagNotFound {
            key: key.to_string(),
        })?;
        parse_json_value(value).map_err(|error| DataError::TagMismatch {
            key: key.to_string(),
            message: error.to_string(),
        })
    }

    /// Same as [`Compound::get`], but a missing tag gives the default value.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, DataError> {
        if self.contains(key) {
            self.get(key)
        } else {
            Ok(default)
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, DataError> {
        self.get(key)
    }

    pub fn get_string(&self, key: &str) -> Result<String, DataError> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, DataError> {
        self.get_or(key, false)
    }

    pub fn get_double(&self, key: &str) -> Result<f64, DataError> {
        self.get(key)
    }

    /// Missing int arrays read as empty, writers omit empty ones.
    pub fn get_int_array(&self, key: &str) -> Result<Vec<i64>, DataError> {
        self.get_or(key, vec![])
    }

    pub fn get_compound(&self, key: &str) -> Result<Compound, DataError> {
        match self.tags.get(key) {
            Some(Value::Object(tags)) => Ok(Compound { tags: tags.clone() }),
            Some(_) => Err(DataError::TagMismatch {
                key: key.to_string(),
                message: "compound expected".to_string(),
            }),
            None => Err(DataError::TagNotFound {
                key: key.to_string(),
            }),
        }
    }

    pub fn get_list(&self, key: &str) -> Result<Vec<Compound>, DataError> {
        match self.tags.get(key) {
            Some(Value::Array(values)) => {
                let mut compounds = Vec::with_capacity(values.len());
                for value in values {
                    match value {
                        Value::Object(tags) => compounds.push(Compound { tags: tags.clone() }),
                        _ => {
                            return Err(DataError::TagMismatch {
                                key: key.to_string(),
                                message: "list of compounds expected".to_string(),
                            })
                        }
                    }
                }
                Ok(compounds)
            }
            Some(_) => Err(DataError::TagMismatch {
                key: key.to_string(),
                message: "list expected".to_string(),
            }),
            None => Ok(vec![]),
        }
    }

    pub fn put<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), DataError> {
        let value = to_json_value(value)?;
        self.tags.insert(key.to_string(), value);
        Ok(())
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.tags.insert(key.to_string(), Value::from(value));
    }

    pub fn put_string(&mut self, key: &str, value: &str) {
        self.tags.insert(key.to_string(), Value::from(value));
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.tags.insert(key.to_string(), Value::from(value));
    }

    pub fn put_double(&mut self, key: &str, value: f64) {
        self.tags.insert(key.to_string(), Value::from(value));
    }

    pub fn put_int_array(&mut self, key: &str, values: &[i64]) {
        self.tags.insert(key.to_string(), Value::from(values.to_vec()));
    }

    pub fn put_compound(&mut self, key: &str, compound: Compound) {
        self.tags
            .insert(key.to_string(), Value::Object(compound.tags));
    }

    pub fn put_list(&mut self, key: &str, compounds: Vec<Compound>) {
        let values = compounds
            .into_iter()
            .map(|compound| Value::Object(compound.tags))
            .collect();
        self.tags.insert(key.to_string(), Value::Array(values));
    }

    pub fn to_json(&self) -> Result<String, DataError> {
        let json = serde_json::to_string(&self.tags)?;
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let tags: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { tags })
    }
}
