//! A directory of connected entities with pluggable per-entity models
//!
//! `roster` sits between a host runtime that produces join and leave signals
//! for connected entities (players on a game server, sessions on a gateway)
//! and the feature modules that want to keep their own state about each of
//! them. The central object is the [`EntityDirectory`], which in response to
//! the host's signals:
//! * registers an [`Entity`] when an unseen id joins, policy permitting
//! * instantiates every registered [`EntityModel`] onto the new entity
//! * fires cancellable lifecycle events so collaborators can veto or amend
//!   a registration or a removal
//! * drops the entity, and with it every attached model, on departure
//!
//! Feature modules stay independent of one another: each defines its own
//! model types and registers them with the directory during its own
//! initialization. Registering a model type after entities have already
//! joined replays it onto the existing population.
//!
//! ```rust
//! use roster::define_entity_model;
//! use roster::prelude::*;
//!
//! define_entity_model!(BlockStats {
//!     broken: u32,
//!     placed: u32,
//! });
//!
//! let mut directory = EntityDirectory::new();
//! directory.register_model::<BlockStats>();
//!
//! // Host join signal.
//! let id = EntityId::new();
//! let entity = directory.resolve(id, "Alice").expect("registration vetoed");
//! entity.model_mut::<BlockStats>().expect("model attached").broken += 1;
//!
//! // Host leave signal.
//! directory.release(id);
//! assert!(!directory.contains(id));
//! ```

pub mod directory;
pub mod entity;
pub mod error;
pub mod hash;
pub mod log;
pub mod prelude;

pub use crate::directory::{DirectorySettings, EntityDirectory};
pub use crate::entity::{Entity, EntityId, EntityModel, ModelRegistry};
pub use crate::error::RosterError;
pub use crate::log::{debug, error, info, trace, warn};
