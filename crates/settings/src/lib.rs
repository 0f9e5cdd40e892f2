//! `nl-settings` — Persisted configuration for the NFC Lab capture engine.
//!
//! Settings live in groups named by dotted paths (`device.radio.airspy`,
//! `decoder.logic`) holding string-valued keys, persisted as a single JSON
//! file. On top of the flat store sit the nested-object views used by the
//! orchestrator:
//!
//! - **Store**: `SettingsStore` — groups of key/value strings, atomic save
//! - **Read**: `read_config` — a group and its subgroups as one nested JSON
//!   object, with value coercion (bool/number/array/string)
//! - **Write**: `save_config` — flatten a nested JSON object back into
//!   dotted groups
//!
//! Saving a group and reading it back yields the same nested object, modulo
//! the coercion rules (everything is stored as text).

pub mod error;
pub mod store;
pub mod tree;

pub use error::{SettingsError, SettingsResult};
pub use store::SettingsStore;
pub use tree::{coerce_value, read_config, save_config};
