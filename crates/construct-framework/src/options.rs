//! # Option Maps
//!
//! Every resource is ultimately described by a flat JSON object of option keys.
//! Defaults and overrides are both expressed as [`Options`] and combined with
//! [`merge`], which is a shallow, last-write-wins overwrite: a key present in
//! the overrides replaces the default value wholesale, nested objects and
//! arrays included.

use crate::error::ConstructError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A resource's option-key to value mapping.
pub type Options = Map<String, Value>;

/// Overlays `overrides` onto `defaults` one key at a time.
pub fn merge(defaults: Options, overrides: Options) -> Options {
    let mut merged = defaults;
    for (key, value) in overrides {
        merged.insert(key, value);
    }
    merged
}

/// Serializes a typed record into an option map.
///
/// Fields that serialize to nothing (e.g. `None` with `skip_serializing_if`)
/// are simply absent, so they never shadow a default during [`merge`].
pub fn to_options<T: Serialize>(value: &T) -> Result<Options, ConstructError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Options::new()),
        other => Err(ConstructError::InvalidOption {
            name: std::any::type_name::<T>().to_string(),
            reason: format!("expected an object, got {other}"),
        }),
    }
}

/// Decodes an option map into the typed record for `name`.
pub fn from_options<T: DeserializeOwned>(name: &str, options: &Options) -> Result<T, ConstructError> {
    serde_json::from_value(Value::Object(options.clone())).map_err(|e| {
        ConstructError::InvalidOption {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })
}
