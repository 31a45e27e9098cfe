//! Common behaviour shared by every listable resource.

use crate::identity::ResourceId;
use serde::{Deserialize, Deserializer};

/// A server resource that lives in a slice's item list.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Partial update payload; absent fields leave the entity untouched.
    type Patch: Clone + Send + Sync + 'static;

    fn id(&self) -> &ResourceId;

    /// Shallow merge: every field present in `patch` overwrites the
    /// corresponding field, every absent field keeps its value.
    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// Field decoder that reads an explicit `null` the way a missing key is
/// read: as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field decoder for clearable patch fields: a missing key stays `None`
/// (with `#[serde(default)]`), an explicit `null` becomes `Some(None)`.
pub fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `slot` when the patch carries a value.
pub fn merge<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Overwrite an optional `slot` when the patch carries a value.
pub fn merge_opt<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}
