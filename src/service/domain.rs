//! Operation set for a single value domain.

use std::sync::Arc;

use crate::error::{Result, StoreError};
use crate::protocol::{DomainValue, Op, Response};
use crate::store::{BulkReply, BulkRequest, InsertRequest, Store};

/// Add / Update / BulkAdd / BulkUpdate / Get / Delete / Clear for one domain
pub struct DomainService<V> {
    store: Arc<Store<V>>,
}

impl<V: DomainValue> DomainService<V> {
    pub fn new(store: Arc<Store<V>>) -> Self {
        Self { store }
    }

    /// The store this service operates on
    pub fn store(&self) -> &Arc<Store<V>> {
        &self.store
    }

    pub fn add(&self, request: InsertRequest<V>) -> Result<()> {
        validate_key(&request.key)?;
        self.store.add(&request.key, request.value)?;
        tracing::debug!("[{}] add {}", V::DOMAIN.as_str(), request.key);
        Ok(())
    }

    pub fn update(&self, request: InsertRequest<V>) -> Result<()> {
        validate_key(&request.key)?;
        self.store.update(&request.key, request.value)?;
        tracing::debug!("[{}] update {}", V::DOMAIN.as_str(), request.key);
        Ok(())
    }

    /// Add every entry whose key is absent
    ///
    /// Fails only on a malformed request; rejections are returned as data.
    pub fn bulk_add(&self, request: BulkRequest<V>) -> Result<BulkReply<V>> {
        self.bulk(request, "bulk_add", |store, entries| store.bulk_add(entries))
    }

    /// Update every entry whose key is present
    ///
    /// Fails only on a malformed request; rejections are returned as data.
    pub fn bulk_update(&self, request: BulkRequest<V>) -> Result<BulkReply<V>> {
        self.bulk(request, "bulk_update", |store, entries| store.bulk_update(entries))
    }

    pub fn get(&self, key: &str) -> Result<V> {
        validate_key(key)?;
        self.store.get(key)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.store.delete(key)?;
        tracing::debug!("[{}] delete {}", V::DOMAIN.as_str(), key);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("[{}] store cleared", V::DOMAIN.as_str());
        Ok(())
    }

    /// Run one operation and translate the outcome into a response
    pub fn execute(&self, op: Op<V>) -> Response {
        let result = match op {
            Op::Add(request) => self.add(request).map(|_| Response::Done),
            Op::Update(request) => self.update(request).map(|_| Response::Done),
            Op::BulkAdd(request) => self
                .bulk_add(request)
                .map(|reply| V::rejects_response(reply.rejects)),
            Op::BulkUpdate(request) => self
                .bulk_update(request)
                .map(|reply| V::rejects_response(reply.rejects)),
            Op::Get { key } => self.get(&key).map(V::into_response),
            Op::Delete { key } => self.delete(&key).map(|_| Response::Done),
            Op::Clear => self.clear().map(|_| Response::Done),
        };

        result.unwrap_or_else(|e| Response::error(&e))
    }

    fn bulk<F>(&self, request: BulkRequest<V>, name: &str, apply: F) -> Result<BulkReply<V>>
    where
        F: FnOnce(&Store<V>, Vec<InsertRequest<V>>) -> BulkReply<V>,
    {
        for entry in &request.entries {
            validate_key(&entry.key)?;
        }

        let submitted = request.entries.len();
        if request.compressed {
            tracing::trace!("[{}] {} marked compressed", V::DOMAIN.as_str(), name);
        }

        let reply = apply(&self.store, request.entries);
        tracing::debug!(
            "[{}] {}: {} submitted, {} rejected",
            V::DOMAIN.as_str(),
            name,
            submitted,
            reply.rejects.len()
        );

        Ok(reply)
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::UnsupportedArgument(
            "key must not be empty".to_string(),
        ));
    }
    Ok(())
}
