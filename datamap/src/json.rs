use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[inline]
pub fn parse_json_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(value)
}

#[inline]
pub fn to_json_value<T: Serialize>(value: T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}
