use crate::{
    error::{Result, TaskoraError},
    model::Entity,
    store::{EntityStore, Version},
};
use std::future::Future;
use std::rc::Rc;

/// Applies mutations to the store before the server confirms them.
///
/// Each call captures its own pre-mutation snapshot and the version stamped by
/// its optimistic write. On failure the snapshot is restored only if that
/// version is still current; if anything wrote the entity in the meantime
/// (another mutation, a reconciling load) the rollback is skipped and the
/// next refresh settles the value.
pub struct OptimisticMutationController<T: Entity> {
    store: Rc<EntityStore<T>>,
}

impl<T: Entity> OptimisticMutationController<T> {
    pub fn new(store: Rc<EntityStore<T>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Rc<EntityStore<T>> {
        &self.store
    }

    /// Replace entity `id` with `mutate(current)`, then run `remote(next)`.
    ///
    /// Returns the optimistic value on success. Fails with `NotFound` without
    /// touching anything if `id` is not in the store. On remote failure the
    /// rollback has already happened by the time the error is returned.
    pub async fn apply<M, R, Fut>(&self, id: &str, mutate: M, remote: R) -> Result<T>
    where
        M: FnOnce(&T) -> T,
        R: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let before = self
            .store
            .get(id)
            .ok_or_else(|| TaskoraError::NotFound(id.to_string()))?;
        let after = mutate(&before);
        let version = self.store.upsert(after.clone());
        tracing::debug!(id = %id, version, "Applied optimistic write");

        match remote(after.clone()).await {
            Ok(()) => {
                tracing::debug!(id = %id, "Remote confirmed write");
                Ok(after)
            }
            Err(err) => {
                self.rollback(id, version, before);
                Err(surface(id, err))
            }
        }
    }

    /// Remove entity `id` locally, then run `remote()`.
    ///
    /// A failed removal re-inserts the snapshot at the end of the slice; the
    /// original position is not preserved.
    pub async fn remove<R, Fut>(&self, id: &str, remote: R) -> Result<T>
    where
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let before = self
            .store
            .get(id)
            .ok_or_else(|| TaskoraError::NotFound(id.to_string()))?;
        let version = self
            .store
            .remove(id)
            .ok_or_else(|| TaskoraError::NotFound(id.to_string()))?;
        tracing::debug!(id = %id, version, "Applied optimistic removal");

        match remote().await {
            Ok(()) => Ok(before),
            Err(err) => {
                self.rollback(id, version, before);
                Err(surface(id, err))
            }
        }
    }

    /// Map every entity in the slice through `mutate` as one change, then run `remote()`.
    ///
    /// Only entities that actually change are written. The remote call is made
    /// even when nothing changed locally, since the server may hold entities
    /// this client has not fetched yet. Returns how many entities changed.
    pub async fn apply_all<M, R, Fut>(&self, mut mutate: M, remote: R) -> Result<usize>
    where
        M: FnMut(&T) -> T,
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let (before, after): (Vec<T>, Vec<T>) = self
            .store
            .snapshot()
            .into_iter()
            .filter_map(|entity| {
                let next = mutate(&entity);
                (next != entity).then_some((entity, next))
            })
            .unzip();
        let changed = after.len();
        let versions = self.store.upsert_many(after);
        tracing::debug!(changed, "Applied optimistic bulk write");

        match remote().await {
            Ok(()) => Ok(changed),
            Err(err) => {
                let restore: Vec<T> = before
                    .into_iter()
                    .zip(versions)
                    .filter(|(entity, version)| self.is_current(entity.id(), *version))
                    .map(|(entity, _)| entity)
                    .collect();
                let skipped = changed - restore.len();
                if skipped > 0 {
                    tracing::warn!(skipped, "Skipped rollback for entities written since the bulk update");
                }
                tracing::info!(restored = restore.len(), "Rolled back bulk update");
                self.store.upsert_many(restore);
                Err(surface("*", err))
            }
        }
    }

    /// Run a create call. Nothing is inserted locally.
    ///
    /// On success `refresh` is awaited so the new entity arrives through the
    /// normal fetch path; a failing refresh is logged, not returned, because
    /// the create itself already landed on the server.
    pub async fn create<C, Fut, S, SFut>(&self, remote: Fut, refresh: S) -> Result<C>
    where
        Fut: Future<Output = Result<C>>,
        S: FnOnce() -> SFut,
        SFut: Future<Output = Result<usize>>,
    {
        let created = remote.await.map_err(|err| surface("new", err))?;
        if let Err(err) = refresh().await {
            tracing::warn!(error = %err, "Refresh after create failed");
        }
        Ok(created)
    }

    fn is_current(&self, id: &str, version: Version) -> bool {
        self.store.version(id) == Some(version)
    }

    /// Compare-and-rollback: restore `snapshot` only if our write is still the latest.
    fn rollback(&self, id: &str, version: Version, snapshot: T) -> bool {
        if self.is_current(id, version) {
            self.store.upsert(snapshot);
            tracing::info!(id = %id, "Rolled back optimistic write");
            true
        } else {
            tracing::warn!(
                id = %id,
                version,
                current = ?self.store.version(id),
                "Skipped rollback; entity changed since the optimistic write"
            );
            false
        }
    }
}

/// 401s stay visible as such; every other remote error becomes a sync failure.
fn surface(id: &str, err: TaskoraError) -> TaskoraError {
    match err {
        TaskoraError::AuthRequired => TaskoraError::AuthRequired,
        other => {
            tracing::warn!(id = %id, error = %other, "Remote call failed");
            TaskoraError::sync_failure(id, other)
        }
    }
}
