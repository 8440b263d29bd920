#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type InputMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type InputMap<K, V> = BTreeMap<K, V>;

/// Bound for input identities.
///
/// Identities are opaque to the engine: they are only compared and used as map keys, so any
/// host handle (a node tag, a pointer-sized id, a string) works.
#[cfg(feature = "std")]
pub trait InputKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> InputKey for K {}

#[cfg(not(feature = "std"))]
pub trait InputKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> InputKey for K {}
