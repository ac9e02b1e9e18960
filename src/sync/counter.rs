use crate::model::Notification;
use crate::store::{EntityStore, ObserverId};
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Number of unread notifications in `items`.
pub fn count_unread(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}

/// Unread count derived from the notification slice.
///
/// Holds no state of its own beyond a memo keyed on the store revision, so it
/// can never drift from a direct count over the store.
pub struct UnreadCounter {
    store: Rc<EntityStore<Notification>>,
    memo: Cell<Option<(u64, usize)>>,
}

impl UnreadCounter {
    pub fn new(store: Rc<EntityStore<Notification>>) -> Self {
        Self {
            store,
            memo: Cell::new(None),
        }
    }

    pub fn value(&self) -> usize {
        let revision = self.store.revision();
        if let Some((seen, count)) = self.memo.get() {
            if seen == revision {
                return count;
            }
        }
        let count = self.store.with_items(count_unread);
        self.memo.set(Some((revision, count)));
        count
    }

    /// Call `on_change` with the new count whenever a store change moves it.
    ///
    /// The observer holds the counter weakly; once the counter is dropped the
    /// callback goes quiet.
    pub fn watch(self: &Rc<Self>, on_change: impl Fn(usize) + 'static) -> ObserverId {
        let counter: Weak<UnreadCounter> = Rc::downgrade(self);
        let last = Cell::new(self.value());
        self.store.subscribe(move |_| {
            let Some(counter) = counter.upgrade() else {
                return;
            };
            let now = counter.value();
            if now != last.replace(now) {
                on_change(now);
            }
        })
    }

    pub fn unwatch(&self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationType;
    use std::cell::RefCell;

    fn note(id: &str, read: bool) -> Notification {
        Notification::new(id, NotificationType::Reminder, "ping").with_read(read)
    }

    #[test]
    fn test_counts_unread_only() {
        let store = Rc::new(EntityStore::new());
        store.load(vec![note("n1", false), note("n2", true)]);
        let counter = UnreadCounter::new(Rc::clone(&store));
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_empty_store_counts_zero() {
        let counter = UnreadCounter::new(Rc::new(EntityStore::new()));
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_tracks_every_kind_of_change() {
        let store = Rc::new(EntityStore::new());
        let counter = UnreadCounter::new(Rc::clone(&store));
        let direct = |s: &EntityStore<Notification>| s.with_items(count_unread);

        store.load(vec![note("n1", false), note("n2", false), note("n3", true)]);
        assert_eq!(counter.value(), direct(&store));

        store.upsert(note("n1", true));
        assert_eq!(counter.value(), direct(&store));

        store.remove("n2");
        assert_eq!(counter.value(), direct(&store));

        store.upsert(note("n4", false));
        store.upsert_many(vec![note("n3", false), note("n4", true)]);
        assert_eq!(counter.value(), direct(&store));
        assert_eq!(counter.value(), 1);
    }

    #[test]
    fn test_watch_reports_only_changes() {
        let store = Rc::new(EntityStore::new());
        store.load(vec![note("n1", false), note("n2", false)]);
        let counter = Rc::new(UnreadCounter::new(Rc::clone(&store)));
        let reported = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&reported);
        let id = counter.watch(move |n| sink.borrow_mut().push(n));

        store.upsert(note("n1", true));
        // Same read flag: count unchanged, nothing reported.
        store.upsert(note("n2", false));
        store.upsert(note("n2", true));

        assert_eq!(*reported.borrow(), vec![1, 0]);
        assert!(counter.unwatch(id));
    }
}
