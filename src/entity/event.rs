/*!

Lifecycle notifications fired by the directory.

[`EntityRegisteringEvent`] fires after a joining entity is fully built (every registered model
attached) and before the directory stores it. [`EntityUnregisteringEvent`] fires before a
departing entity is removed. Handlers subscribe through
[`EntityDirectory::subscribe_to_registering`](crate::directory::EntityDirectory::subscribe_to_registering)
and
[`EntityDirectory::subscribe_to_unregistering`](crate::directory::EntityDirectory::subscribe_to_unregistering)
and run synchronously, in subscription order, on the thread that delivered the host signal.

Either event can be cancelled to veto the transition. Clearing the carried entity cancels
implicitly; cancellation is ordinary control flow, not an error.

*/

use crate::entity::{Entity, EntityId};

/// Fired after a new entity is fully built and before the directory stores it.
///
/// Carries the entity by value: until a handler lets it through, the entity
/// exists nowhere else. A handler may mutate it in place, replace it with a
/// substitute (which is stored under the substitute's own id), clear it, or
/// cancel the registration outright.
pub struct EntityRegisteringEvent {
    entity: Option<Entity>,
    cancelled: bool,
}

impl EntityRegisteringEvent {
    pub(crate) fn new(entity: Entity) -> Self {
        EntityRegisteringEvent {
            entity: Some(entity),
            cancelled: false,
        }
    }

    #[must_use]
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.entity.as_mut()
    }

    /// Substitutes the entity to store, returning the one it displaces.
    pub fn replace_entity(&mut self, entity: Entity) -> Option<Entity> {
        self.entity.replace(entity)
    }

    /// Takes the carried entity out of the event; treated as cancellation.
    pub fn clear_entity(&mut self) -> Option<Entity> {
        self.entity.take()
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    /// Marks the event cancelled: the entity will not be stored.
    pub fn cancel(&mut self) {
        self.set_cancelled(true);
    }

    /// Cancelled explicitly, or implicitly because no entity is carried.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled || self.entity.is_none()
    }

    pub(crate) fn into_entity(self) -> Option<Entity> {
        if self.is_cancelled() {
            None
        } else {
            self.entity
        }
    }
}

/// Fired before a departing entity is removed from the directory.
///
/// Carries the entity's id; the entity itself is still stored and can be
/// inspected through the directory reference handlers receive. A handler may
/// substitute a different id (that entity is removed instead), clear the id,
/// or cancel the removal outright.
pub struct EntityUnregisteringEvent {
    entity: Option<EntityId>,
    cancelled: bool,
}

impl EntityUnregisteringEvent {
    pub(crate) fn new(entity: EntityId) -> Self {
        EntityUnregisteringEvent {
            entity: Some(entity),
            cancelled: false,
        }
    }

    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    /// Substitutes the id to remove, returning the one it displaces.
    pub fn replace_entity(&mut self, entity: EntityId) -> Option<EntityId> {
        self.entity.replace(entity)
    }

    /// Takes the carried id out of the event; treated as cancellation.
    pub fn clear_entity(&mut self) -> Option<EntityId> {
        self.entity.take()
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    /// Marks the event cancelled: the entity will stay in the directory.
    pub fn cancel(&mut self) {
        self.set_cancelled(true);
    }

    /// Cancelled explicitly, or implicitly because no id is carried.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled || self.entity.is_none()
    }

    pub(crate) fn target(self) -> Option<EntityId> {
        if self.is_cancelled() {
            None
        } else {
            self.entity
        }
    }
}
