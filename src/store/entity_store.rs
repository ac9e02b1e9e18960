use crate::model::Entity;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Stamp of the last write that touched an entity id.
///
/// Stamps come from a store-wide counter that never goes back, so a stamp
/// captured before any later write to the same id can never match again.
pub type Version = u64;

pub type ObserverId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { count: usize },
    Upserted { id: String, inserted: bool },
    UpsertedMany { count: usize },
    Removed { id: String },
}

type Observer = Rc<dyn Fn(&StoreEvent)>;

struct Slice<T> {
    /// Display order is insertion order.
    items: Vec<T>,
    /// Last write stamp per id. Removed ids keep theirs until the next load.
    versions: HashMap<String, Version>,
    clock: Version,
    revision: u64,
}

impl<T: Entity> Slice<T> {
    fn stamp(&mut self, id: &str) -> Version {
        self.clock += 1;
        self.versions.insert(id.to_string(), self.clock);
        self.clock
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|e| e.id() == id)
    }

    /// Returns the new version and whether the entity was appended.
    fn upsert(&mut self, entity: T) -> (Version, bool) {
        let version = self.stamp(entity.id());
        let inserted = match self.position(entity.id()) {
            Some(pos) => {
                self.items[pos] = entity;
                false
            }
            None => {
                self.items.push(entity);
                true
            }
        };
        (version, inserted)
    }
}

/// Observable, ordered collection of one entity kind, keyed by id.
///
/// Shared through `Rc` inside a single-threaded runtime. Interior state sits
/// in a `RefCell` that is never held across an observer call or an await.
pub struct EntityStore<T: Entity> {
    slice: RefCell<Slice<T>>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<ObserverId>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            slice: RefCell::new(Slice {
                items: Vec::new(),
                versions: HashMap::new(),
                clock: 0,
                revision: 0,
            }),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(1),
        }
    }

    /// Replace the whole slice with `entities`.
    ///
    /// Version bookkeeping is reset to the loaded ids, each with a fresh
    /// stamp. A rollback captured before the load then finds either no
    /// version or a newer one, and is skipped as stale.
    pub fn load(&self, entities: Vec<T>) {
        let count = entities.len();
        {
            let mut slice = self.slice.borrow_mut();
            slice.versions.clear();
            for entity in &entities {
                slice.stamp(entity.id());
            }
            slice.items = entities;
            slice.revision += 1;
        }
        tracing::debug!(count, "Loaded slice");
        self.notify(&StoreEvent::Loaded { count });
    }

    /// Insert or replace by id. Replacement keeps the entity's position.
    pub fn upsert(&self, entity: T) -> Version {
        let id = entity.id().to_string();
        let (version, inserted) = {
            let mut slice = self.slice.borrow_mut();
            let result = slice.upsert(entity);
            slice.revision += 1;
            result
        };
        self.notify(&StoreEvent::Upserted { id, inserted });
        version
    }

    /// Upsert several entities as one observable change.
    ///
    /// Returned versions line up with the input order.
    pub fn upsert_many(&self, entities: Vec<T>) -> Vec<Version> {
        let count = entities.len();
        if count == 0 {
            return Vec::new();
        }
        let versions = {
            let mut slice = self.slice.borrow_mut();
            let versions: Vec<Version> = entities
                .into_iter()
                .map(|entity| slice.upsert(entity).0)
                .collect();
            slice.revision += 1;
            versions
        };
        self.notify(&StoreEvent::UpsertedMany { count });
        versions
    }

    /// Delete by id. Absent ids are a no-op and return `None`.
    pub fn remove(&self, id: &str) -> Option<Version> {
        let version = {
            let mut slice = self.slice.borrow_mut();
            let pos = slice.position(id)?;
            slice.items.remove(pos);
            slice.revision += 1;
            slice.stamp(id)
        };
        self.notify(&StoreEvent::Removed { id: id.to_string() });
        Some(version)
    }

    pub fn get(&self, id: &str) -> Option<T> {
        let slice = self.slice.borrow();
        slice.items.iter().find(|e| e.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slice.borrow().position(id).is_some()
    }

    /// Current version of `id`; `None` if unseen since the last load.
    pub fn version(&self, id: &str) -> Option<Version> {
        self.slice.borrow().versions.get(id).copied()
    }

    /// Bumped once per observable change.
    pub fn revision(&self) -> u64 {
        self.slice.borrow().revision
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.slice.borrow().items.clone()
    }

    /// Read the slice in place without cloning it.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let slice = self.slice.borrow();
        f(&slice.items)
    }

    pub fn len(&self) -> usize {
        self.slice.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slice.borrow().items.is_empty()
    }

    /// Register an observer that runs synchronously after every mutation.
    pub fn subscribe(&self, observer: impl Fn(&StoreEvent) + 'static) -> ObserverId {
        let id = self.next_observer.get();
        self.next_observer.set(id + 1);
        let observer: Observer = Rc::new(observer);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(oid, _)| *oid != id);
        observers.len() != before
    }

    fn notify(&self, event: &StoreEvent) {
        // Observers may read the store or (un)subscribe, so call them on a copy.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, o)| Rc::clone(o))
            .collect();
        for observer in observers {
            observer(event);
        }
    }
}
