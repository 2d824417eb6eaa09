/*!

The entity directory is the top-level registry: it maps entity ids to [`Entity`] records,
holds the set of globally registered model types, and applies the join/leave policy.

A host adapter feeds it two signals. "Entity joined" enters through
[`EntityDirectory::resolve`], which registers an unseen id (policy and handlers permitting)
after instantiating every registered model onto the new entity. "Entity departed" enters
through [`EntityDirectory::release`], which removes the entity unless a handler vetoes it.
`resolve` doubles as the get-or-create read path for collaborators that hold a live id;
[`EntityDirectory::get`] and [`EntityDirectory::get_mut`] are the pure read paths.

Feature modules call [`EntityDirectory::register_model`] during their own initialization;
registering a type after entities have already joined replays it onto the existing
population.

All operations run synchronously on the calling thread. The directory holds non-`Send`
handler lists, so a multi-threaded host confines each directory to one thread or wraps it in
a single coarse lock.

*/

use std::any::TypeId;
use std::rc::Rc;

use indexmap::IndexMap;
use log::error;
use serde::{Deserialize, Serialize};

use crate::entity::model::ModelFactory;
use crate::entity::{
    Entity, EntityId, EntityModel, EntityRegisteringEvent, EntityUnregisteringEvent,
};
use crate::hash::{HashMap, HashSet};

type RegisteringHandler = Rc<dyn Fn(&mut EntityDirectory, &mut EntityRegisteringEvent)>;
type UnregisteringHandler = Rc<dyn Fn(&mut EntityDirectory, &mut EntityUnregisteringEvent)>;

/// The join/leave policy, loadable from host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Whether unseen entities are registered on resolve.
    pub accept_new: bool,
    /// Whether departing entities are removed on release.
    pub evict_on_departure: bool,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        DirectorySettings {
            accept_new: true,
            evict_on_departure: true,
        }
    }
}

/// The registry of connected entities and the model types attached to them.
pub struct EntityDirectory {
    entities: HashMap<EntityId, Entity>,
    models: IndexMap<TypeId, ModelFactory>,
    accept_new: bool,
    evict_on_departure: bool,
    registering_handlers: Vec<RegisteringHandler>,
    unregistering_handlers: Vec<UnregisteringHandler>,
    // Ids whose registration/removal is in flight; a re-entrant call from a
    // handler for the same id is a no-op instead of unbounded recursion.
    resolving: HashSet<EntityId>,
    releasing: HashSet<EntityId>,
}

impl EntityDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(DirectorySettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: DirectorySettings) -> Self {
        EntityDirectory {
            entities: HashMap::default(),
            models: IndexMap::new(),
            accept_new: settings.accept_new,
            evict_on_departure: settings.evict_on_departure,
            registering_handlers: Vec::new(),
            unregistering_handlers: Vec::new(),
            resolving: HashSet::default(),
            releasing: HashSet::default(),
        }
    }

    /// Looks up `id`, registering a new entity first if the id is unseen and
    /// the directory accepts new entities.
    ///
    /// `display_name` only applies to a newly registered entity; for a stored
    /// one it is ignored. Returns `None` when the id is unseen and
    /// registration is off, when a model constructor fails (the partially
    /// built entity is discarded), or when a registering handler vetoes the
    /// registration.
    pub fn resolve(&mut self, id: EntityId, display_name: &str) -> Option<&mut Entity> {
        if !self.entities.contains_key(&id) {
            if !self.accept_new || !self.resolving.insert(id) {
                return None;
            }
            let registered = self.register_entity(id, display_name);
            self.resolving.remove(&id);
            let stored = registered?;
            return self.entities.get_mut(&stored);
        }
        self.entities.get_mut(&id)
    }

    fn register_entity(&mut self, id: EntityId, display_name: &str) -> Option<EntityId> {
        let mut entity = Entity::new(id, display_name);
        for factory in self.models.values() {
            if let Err(err) = factory.attach(&mut entity) {
                error!(
                    "failed to instantiate model {} for {id}: {err}",
                    factory.name()
                );
                return None;
            }
        }

        let mut event = EntityRegisteringEvent::new(entity);
        for handler in self.registering_handlers.clone() {
            handler(self, &mut event);
        }

        let entity = event.into_entity()?;
        let stored = entity.id();
        self.entities.insert(stored, entity);
        Some(stored)
    }

    /// Removes `id` from the directory, dropping the entity and its models,
    /// unless eviction is off or an unregistering handler vetoes it.
    ///
    /// Releasing an id that is not stored fires the event but removes
    /// nothing. Always returns the directory for chaining.
    pub fn release(&mut self, id: EntityId) -> &mut Self {
        if !self.evict_on_departure || !self.releasing.insert(id) {
            return self;
        }

        let mut event = EntityUnregisteringEvent::new(id);
        for handler in self.unregistering_handlers.clone() {
            handler(self, &mut event);
        }
        self.releasing.remove(&id);

        if let Some(target) = event.target() {
            self.entities.remove(&target);
        }
        self
    }

    /// Registers `M` so that every current and future entity carries an
    /// instance. Registering a type twice is a no-op: instances on existing
    /// entities are not reconstructed.
    ///
    /// A per-entity instantiation failure during the replay is logged and
    /// skipped; the remaining entities still receive the model and the type
    /// registers regardless.
    pub fn register_model<M: EntityModel>(&mut self) -> &mut Self {
        if self.models.contains_key(&TypeId::of::<M>()) {
            return self;
        }

        let factory = ModelFactory::of::<M>();
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            let Some(entity) = self.entities.get_mut(&id) else {
                continue;
            };
            if let Err(err) = factory.attach(entity) {
                error!(
                    "failed to instantiate model {} for {id}: {err}",
                    factory.name()
                );
            }
        }
        self.models.insert(TypeId::of::<M>(), factory);
        self
    }

    /// Drops `M` from every stored entity and from future registrations.
    /// Unregistering a type that was never registered is a no-op.
    pub fn unregister_model<M: EntityModel>(&mut self) -> &mut Self {
        let type_id = TypeId::of::<M>();
        for entity in self.entities.values_mut() {
            entity.models_mut().remove_raw(type_id);
        }
        self.models.shift_remove(&type_id);
        self
    }

    #[must_use]
    pub fn has_model_type<M: EntityModel>(&self) -> bool {
        self.models.contains_key(&TypeId::of::<M>())
    }

    #[must_use]
    pub fn model_type_count(&self) -> usize {
        self.models.len()
    }

    /// Subscribes a handler to the registering event. Handlers run
    /// synchronously, in subscription order, and receive the directory so
    /// they can consult or amend it.
    pub fn subscribe_to_registering(
        &mut self,
        handler: impl Fn(&mut EntityDirectory, &mut EntityRegisteringEvent) + 'static,
    ) {
        self.registering_handlers.push(Rc::new(handler));
    }

    /// Subscribes a handler to the unregistering event.
    pub fn subscribe_to_unregistering(
        &mut self,
        handler: impl Fn(&mut EntityDirectory, &mut EntityUnregisteringEvent) + 'static,
    ) {
        self.unregistering_handlers.push(Rc::new(handler));
    }

    pub fn set_accept_new(&mut self, accept_new: bool) -> &mut Self {
        self.accept_new = accept_new;
        self
    }

    pub fn set_evict_on_departure(&mut self, evict_on_departure: bool) -> &mut Self {
        self.evict_on_departure = evict_on_departure;
        self
    }

    /// Combined setter for both policy toggles.
    pub fn set_lifecycle(&mut self, accept_new: bool, evict_on_departure: bool) -> &mut Self {
        self.set_accept_new(accept_new)
            .set_evict_on_departure(evict_on_departure)
    }

    /// Turns both toggles on.
    pub fn enable_all(&mut self) -> &mut Self {
        self.set_lifecycle(true, true)
    }

    /// Turns both toggles off: the directory keeps its current population as
    /// entities come and go.
    pub fn disable_all(&mut self) -> &mut Self {
        self.set_lifecycle(false, false)
    }

    #[must_use]
    pub fn accepts_new(&self) -> bool {
        self.accept_new
    }

    #[must_use]
    pub fn evicts_on_departure(&self) -> bool {
        self.evict_on_departure
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

impl Default for EntityDirectory {
    fn default() -> Self {
        Self::new()
    }
}
