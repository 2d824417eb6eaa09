//! End-to-end exercise of the directory against a simulated host session:
//! join and leave signals, per-entity stat counting from gameplay signals,
//! late model registration, and an unregistering veto.

use roster::define_entity_model;
use roster::prelude::*;

define_entity_model!(BlockStats {
    broken: u32,
    placed: u32,
});

// A purse opens with a starting balance, so it implements the trait by hand.
struct Purse {
    owner: EntityId,
    balance: i64,
}

impl EntityModel for Purse {
    fn init(entity: &Entity) -> Result<Self, RosterError> {
        Ok(Purse {
            owner: entity.id(),
            balance: 100,
        })
    }

    fn owner(&self) -> EntityId {
        self.owner
    }

    fn name() -> &'static str {
        "Purse"
    }
}

enum HostSignal {
    Joined(EntityId, &'static str),
    BrokeBlock(EntityId),
    PlacedBlock(EntityId),
    Quit(EntityId),
}

fn drive(directory: &mut EntityDirectory, signals: &[HostSignal]) {
    for signal in signals {
        match *signal {
            HostSignal::Joined(id, name) => {
                directory.resolve(id, name);
            }
            HostSignal::BrokeBlock(id) => {
                if let Some(stats) = directory
                    .get_mut(id)
                    .and_then(|entity| entity.model_mut::<BlockStats>())
                {
                    stats.broken += 1;
                }
            }
            HostSignal::PlacedBlock(id) => {
                if let Some(stats) = directory
                    .get_mut(id)
                    .and_then(|entity| entity.model_mut::<BlockStats>())
                {
                    stats.placed += 1;
                }
            }
            HostSignal::Quit(id) => {
                if directory.contains(id) {
                    directory.release(id);
                }
            }
        }
    }
}

#[test]
fn counts_block_activity_per_entity_across_a_session() {
    let mut directory = EntityDirectory::new();
    directory.register_model::<BlockStats>();

    let alice = EntityId::new();
    let bob = EntityId::new();
    drive(
        &mut directory,
        &[
            HostSignal::Joined(alice, "Alice"),
            HostSignal::Joined(bob, "Bob"),
            HostSignal::BrokeBlock(alice),
            HostSignal::BrokeBlock(alice),
            HostSignal::PlacedBlock(bob),
            HostSignal::BrokeBlock(bob),
        ],
    );

    let stats = directory.get(alice).unwrap().model::<BlockStats>().unwrap();
    assert_eq!((stats.broken, stats.placed), (2, 0));
    let stats = directory.get(bob).unwrap().model::<BlockStats>().unwrap();
    assert_eq!((stats.broken, stats.placed), (1, 1));

    drive(&mut directory, &[HostSignal::Quit(alice)]);
    assert!(!directory.contains(alice));
    assert!(directory.contains(bob));

    // Activity from an entity that already left is dropped on the floor.
    drive(&mut directory, &[HostSignal::BrokeBlock(alice)]);
    assert!(!directory.contains(alice));

    // Rejoining starts a fresh count.
    drive(
        &mut directory,
        &[
            HostSignal::Joined(alice, "Alice"),
            HostSignal::PlacedBlock(alice),
        ],
    );
    let stats = directory.get(alice).unwrap().model::<BlockStats>().unwrap();
    assert_eq!((stats.broken, stats.placed), (0, 1));
}

#[test]
fn late_registration_replays_onto_the_connected_population() {
    let mut directory = EntityDirectory::new();

    let alice = EntityId::new();
    let bob = EntityId::new();
    drive(
        &mut directory,
        &[
            HostSignal::Joined(alice, "Alice"),
            HostSignal::Joined(bob, "Bob"),
            // No model registered yet, so this counts nothing.
            HostSignal::BrokeBlock(alice),
        ],
    );
    assert!(directory.get(alice).unwrap().models().is_empty());

    // An economy module and a stats module come up after the entities joined.
    directory.register_model::<BlockStats>();
    directory.register_model::<Purse>();

    for entity in directory.iter() {
        assert!(entity.has_model::<BlockStats>());
        assert_eq!(entity.model::<Purse>().unwrap().balance, 100);
        assert_eq!(entity.model::<Purse>().unwrap().owner(), entity.id());
    }

    drive(&mut directory, &[HostSignal::BrokeBlock(alice)]);
    let stats = directory.get(alice).unwrap().model::<BlockStats>().unwrap();
    assert_eq!(stats.broken, 1);
}

#[test]
fn an_unregistering_veto_keeps_the_entity_across_a_quit() {
    let mut directory = EntityDirectory::new();
    directory.register_model::<BlockStats>();

    let vip = EntityId::new();
    let guest = EntityId::new();
    directory.subscribe_to_unregistering(move |_directory, event| {
        if event.entity() == Some(vip) {
            event.cancel();
        }
    });

    drive(
        &mut directory,
        &[
            HostSignal::Joined(vip, "Vip"),
            HostSignal::Joined(guest, "Guest"),
            HostSignal::BrokeBlock(vip),
            HostSignal::Quit(guest),
            HostSignal::Quit(vip),
        ],
    );

    assert!(!directory.contains(guest));
    // The veto preserved the entity and its accumulated state.
    let stats = directory.get(vip).unwrap().model::<BlockStats>().unwrap();
    assert_eq!(stats.broken, 1);
}
