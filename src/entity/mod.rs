/*!

A connected entity is represented by an [`Entity`] record: the stable [`EntityId`] the host
supplied when the entity joined, a mutable display name, and the [`ModelRegistry`] holding the
models feature modules have attached to it. Entities are created and dropped by the
[`EntityDirectory`](crate::directory::EntityDirectory) in response to the host's join and
leave signals; constructing one directly is only useful to registering-event handlers that
substitute a replacement.

Models are defined by implementing [`EntityModel`] (or with the
[`define_entity_model!`](crate::define_entity_model) macro) and registered with the directory,
which instantiates them onto every current and future entity. See the
[`model`](crate::entity::model) module.

*/

pub mod event;
pub mod model;

// Flatten the module hierarchy.
pub use event::{EntityRegisteringEvent, EntityUnregisteringEvent};
pub use model::{EntityModel, ModelRegistry};

use std::any::TypeId;
use std::fmt::{self, Debug, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RosterError;

/// The stable identifier of a connected entity, supplied by the host when the entity joins.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Mints a fresh random id, for hosts (and tests) that generate their own identifiers.
    #[must_use]
    pub fn new() -> Self {
        EntityId(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        EntityId(uuid)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Entity {}", self.0)
    }
}

/// One tracked entity and the models attached to it.
pub struct Entity {
    id: EntityId,
    display_name: String,
    models: ModelRegistry,
}

impl Entity {
    /// Creates a detached entity with an empty model registry.
    #[must_use]
    pub fn new(id: EntityId, display_name: impl Into<String>) -> Self {
        Entity {
            id,
            display_name: display_name.into(),
            models: ModelRegistry::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Changes the display name. The host's own presentation of the entity
    /// (name tags, session lists) is unaffected.
    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    /// Instantiates `M` onto this entity, overwriting any prior instance for
    /// that type.
    pub fn attach_model<M: EntityModel>(&mut self) -> Result<&mut M, RosterError> {
        let model = M::init(self)?;
        self.models.insert(TypeId::of::<M>(), Box::new(model));
        Ok(self.models.get_mut::<M>().unwrap())
    }

    /// Removes and drops `M`'s instance, if any.
    pub fn detach_model<M: EntityModel>(&mut self) {
        self.models.detach::<M>();
    }

    #[must_use]
    pub fn model<M: EntityModel>(&self) -> Option<&M> {
        self.models.get::<M>()
    }

    pub fn model_mut<M: EntityModel>(&mut self) -> Option<&mut M> {
        self.models.get_mut::<M>()
    }

    #[must_use]
    pub fn has_model<M: EntityModel>(&self) -> bool {
        self.models.has::<M>()
    }

    #[must_use]
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub(crate) fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }
}

impl Debug for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("models", &self.models.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_entity_model;

    define_entity_model!(Badge { stars: u8 });

    #[test]
    fn id_display_and_debug() {
        let uuid = Uuid::nil();
        let id = EntityId::from(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(format!("{id}"), uuid.to_string());
        assert_eq!(format!("{id:?}"), format!("Entity {uuid}"));
    }

    #[test]
    fn id_serializes_transparently() {
        let id = EntityId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_name_is_mutable() {
        let mut entity = Entity::new(EntityId::new(), "Alice");
        assert_eq!(entity.display_name(), "Alice");
        entity.set_display_name("Alicia");
        assert_eq!(entity.display_name(), "Alicia");
    }

    #[test]
    fn attach_and_detach_models() {
        let mut entity = Entity::new(EntityId::new(), "Alice");
        assert!(entity.models().is_empty());

        entity.attach_model::<Badge>().unwrap();
        assert!(entity.has_model::<Badge>());
        assert_eq!(entity.models().len(), 1);
        assert_eq!(entity.model::<Badge>().unwrap().owner(), entity.id());

        entity.detach_model::<Badge>();
        assert!(!entity.has_model::<Badge>());

        // Detaching an absent model is a no-op.
        entity.detach_model::<Badge>();
        assert!(entity.models().is_empty());
    }

    #[test]
    fn attach_overwrites_prior_instance() {
        let mut entity = Entity::new(EntityId::new(), "Alice");
        entity.attach_model::<Badge>().unwrap().stars = 3;
        entity.attach_model::<Badge>().unwrap();
        assert_eq!(entity.model::<Badge>().unwrap().stars, 0);
        assert_eq!(entity.models().len(), 1);
    }
}
