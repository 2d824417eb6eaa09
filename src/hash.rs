//! This module provides deterministic `HashMap` and `HashSet` variants. The hashing data
//! structures in the standard library are not deterministic:
//!
//! > By default, HashMap uses a hashing algorithm selected to provide
//! > resistance against HashDoS attacks. The algorithm is randomly seeded, and a
//! > reasonable best-effort is made to generate this seed from a high quality,
//! > secure source of randomness provided by the host without blocking the program.
//!
//! The `FxHashMap<K, V>` alias does not have a `new` method. Use `HashMap::default()`
//! instead to create a new hashmap with the deterministic hasher, and likewise for
//! `HashSet`.

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
