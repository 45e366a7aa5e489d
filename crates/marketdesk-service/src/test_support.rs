//! Fault-injecting Entity API used by service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use marketdesk_core::error::AppError;
use marketdesk_core::result::AppResult;
use marketdesk_core::traits::EntityApi;
use marketdesk_core::types::{Query, Record, Where};
use marketdesk_database::MemoryEntityStore;

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Create,
    List,
    FindOne,
    Count,
    Destroy,
    CreateIfAbsent,
}

/// Wraps a [`MemoryEntityStore`], failing selected operations on demand.
#[derive(Debug)]
pub(crate) struct FaultyStore {
    pub(crate) inner: MemoryEntityStore,
    failing: Mutex<Vec<Op>>,
    /// Updates remaining before every further update fails; negative disables.
    updates_left: AtomicI64,
    /// Creates remaining before every further create fails; negative disables.
    creates_left: AtomicI64,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryEntityStore::new(),
            failing: Mutex::new(Vec::new()),
            updates_left: AtomicI64::new(-1),
            creates_left: AtomicI64::new(-1),
        }
    }

    /// Make every call of `op` fail.
    pub(crate) fn fail(&self, op: Op) {
        self.failing.lock().unwrap().push(op);
    }

    /// Let `n` updates succeed, then fail the rest.
    pub(crate) fn fail_updates_after(&self, n: i64) {
        self.updates_left.store(n, Ordering::SeqCst);
    }

    /// Let `n` creates succeed, then fail the rest.
    pub(crate) fn fail_creates_after(&self, n: i64) {
        self.creates_left.store(n, Ordering::SeqCst);
    }

    fn check(&self, op: Op) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(AppError::database(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

fn countdown(counter: &AtomicI64, what: &str) -> AppResult<()> {
    let left = counter.load(Ordering::SeqCst);
    if left < 0 {
        return Ok(());
    }
    if left == 0 {
        return Err(AppError::database(format!("injected {what} failure")));
    }
    counter.store(left - 1, Ordering::SeqCst);
    Ok(())
}

#[async_trait]
impl EntityApi for FaultyStore {
    async fn create(&self, entity: &str, fields: Record) -> AppResult<Record> {
        self.check(Op::Create)?;
        countdown(&self.creates_left, "create")?;
        self.inner.create(entity, fields).await
    }

    async fn find_all(&self, entity: &str, query: &Query) -> AppResult<Vec<Record>> {
        self.inner.find_all(entity, query).await
    }

    async fn find_one(&self, entity: &str, filter: &Where) -> AppResult<Option<Record>> {
        self.check(Op::FindOne)?;
        self.inner.find_one(entity, filter).await
    }

    async fn update(&self, entity: &str, fields: Record, filter: &Where) -> AppResult<u64> {
        countdown(&self.updates_left, "update")?;
        self.inner.update(entity, fields, filter).await
    }

    async fn destroy(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        self.check(Op::Destroy)?;
        self.inner.destroy(entity, filter).await
    }

    async fn count(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        self.check(Op::Count)?;
        self.inner.count(entity, filter).await
    }

    async fn list(&self, entity: &str) -> AppResult<Vec<Record>> {
        self.check(Op::List)?;
        self.inner.list(entity).await
    }

    async fn create_if_absent(
        &self,
        entity: &str,
        filter: &Where,
        fields: Record,
    ) -> AppResult<Option<Record>> {
        self.check(Op::CreateIfAbsent)?;
        self.inner.create_if_absent(entity, filter, fields).await
    }
}
