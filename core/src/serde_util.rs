//! Serde helpers for the backend's wire format.

/// Deserializes `null` as `T::default()`.
///
/// The backend emits `null` for unset optional fields, and `#[serde(default)]`
/// alone only covers a missing key.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
