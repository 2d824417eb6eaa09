pub use crate::define_entity_model;
pub use crate::directory::{DirectorySettings, EntityDirectory};
pub use crate::entity::{
    Entity, EntityId, EntityModel, EntityRegisteringEvent, EntityUnregisteringEvent,
    ModelRegistry,
};
pub use crate::error::RosterError;
pub use crate::log::{debug, error, info, trace, warn};
