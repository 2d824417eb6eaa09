/*!

A model is a per-entity data holder contributed by a feature module: block statistics, a
currency purse, a mute flag. Each concrete model type is instantiated at most once per entity,
stored in the entity's [`ModelRegistry`] keyed by the model's `TypeId`, and dropped when the
type is unregistered or the entity departs.

Plain data-bag models are defined with [`define_entity_model!`](crate::define_entity_model);
models with fallible or non-default construction implement [`EntityModel`] by hand:

```rust
use roster::entity::{Entity, EntityId, EntityModel};
use roster::error::RosterError;

struct Purse {
    owner: EntityId,
    balance: i64,
}

impl EntityModel for Purse {
    fn init(entity: &Entity) -> Result<Self, RosterError> {
        Ok(Purse { owner: entity.id(), balance: 100 })
    }

    fn owner(&self) -> EntityId {
        self.owner
    }
}
```

*/

use std::any::{Any, TypeId};

use crate::entity::{Entity, EntityId};
use crate::error::RosterError;
use crate::hash::HashMap;

/// A per-entity data holder contributed by a feature module.
pub trait EntityModel: Any {
    /// Constructs the model bound to its owning entity. Called when the
    /// entity joins with the model's type already registered, or when the
    /// type is registered onto an existing population.
    fn init(entity: &Entity) -> Result<Self, RosterError>
    where
        Self: Sized;

    /// The id of the owning entity.
    fn owner(&self) -> EntityId;

    /// Stable label used in diagnostics.
    #[must_use]
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Instantiates a registered model type onto entities without naming the
/// concrete type: one entry of the type-to-constructor table held by the
/// directory.
pub(crate) struct ModelFactory {
    name: &'static str,
    attach: Box<dyn Fn(&mut Entity) -> Result<(), RosterError>>,
}

impl ModelFactory {
    pub(crate) fn of<M: EntityModel>() -> Self {
        ModelFactory {
            name: M::name(),
            attach: Box::new(|entity| {
                let model = M::init(entity)?;
                entity
                    .models_mut()
                    .insert(TypeId::of::<M>(), Box::new(model));
                Ok(())
            }),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn attach(&self, entity: &mut Entity) -> Result<(), RosterError> {
        (self.attach)(entity)
    }
}

/// The models attached to one entity, at most one instance per concrete type.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<TypeId, Box<dyn Any>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn get<M: EntityModel>(&self) -> Option<&M> {
        self.models
            .get(&TypeId::of::<M>())
            .and_then(|model| model.downcast_ref::<M>())
    }

    pub fn get_mut<M: EntityModel>(&mut self) -> Option<&mut M> {
        self.models
            .get_mut(&TypeId::of::<M>())
            .and_then(|model| model.downcast_mut::<M>())
    }

    #[must_use]
    pub fn has<M: EntityModel>(&self) -> bool {
        self.models.contains_key(&TypeId::of::<M>())
    }

    /// Removes and drops `M`'s instance; no-op if absent.
    pub fn detach<M: EntityModel>(&mut self) {
        self.models.remove(&TypeId::of::<M>());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(crate) fn insert(&mut self, type_id: TypeId, model: Box<dyn Any>) {
        self.models.insert(type_id, model);
    }

    pub(crate) fn remove_raw(&mut self, type_id: TypeId) {
        self.models.remove(&type_id);
    }
}

/// Defines a plain data-bag model: a struct whose fields start at their
/// `Default` values when the model is instantiated onto an entity.
///
/// ```rust
/// use roster::define_entity_model;
///
/// define_entity_model!(BlockStats {
///     broken: u32,
///     placed: u32,
/// });
/// ```
///
/// The generated type records its owning entity's id and exposes it through
/// [`EntityModel::owner`](crate::entity::EntityModel::owner). Models whose
/// construction can fail, or whose fields need values derived from the
/// entity, implement [`EntityModel`](crate::entity::EntityModel) by hand.
#[macro_export]
macro_rules! define_entity_model {
    ($model:ident { $($field:ident: $type:ty),+ $(,)? }) => {
        pub struct $model {
            owner: $crate::entity::EntityId,
            $(pub $field: $type,)+
        }

        impl $crate::entity::EntityModel for $model {
            fn init(
                entity: &$crate::entity::Entity,
            ) -> Result<Self, $crate::error::RosterError> {
                Ok($model {
                    owner: entity.id(),
                    $($field: Default::default(),)+
                })
            }

            fn owner(&self) -> $crate::entity::EntityId {
                self.owner
            }

            fn name() -> &'static str {
                stringify!($model)
            }
        }
    };
}
pub use define_entity_model;
