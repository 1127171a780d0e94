//! In-memory document collection with change listeners.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::{CarDocument, CarRecord};
use crate::error::{Error, Result};
use crate::port::{CarCollection, ChangeListener, ListenerRegistration};

/// A named collection of [`CarDocument`]s held in memory.
///
/// Listeners run on the writing thread, outside every internal lock, so a
/// listener may read the collection again.
#[derive(Clone)]
pub struct MemoryCollection {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    docs: RwLock<BTreeMap<String, CarDocument>>,
    listeners: Mutex<HashMap<u64, Arc<ChangeListener>>>,
    next_listener: AtomicU64,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                docs: RwLock::new(BTreeMap::new()),
                listeners: Mutex::new(HashMap::new()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.docs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.docs.read().is_empty()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Upsert one document and notify listeners with it.
    pub fn set(&self, doc: CarDocument) {
        self.set_all(vec![doc]);
    }

    /// Upsert a batch of documents and notify listeners with the batch.
    pub fn set_all(&self, docs: Vec<CarDocument>) {
        {
            let mut stored = self.inner.docs.write();
            for doc in &docs {
                stored.insert(doc.document_id.clone(), doc.clone());
            }
        }
        debug!(collection = %self.inner.name, count = docs.len(), "Documents written");
        self.notify(|| Ok(docs.clone()));
    }

    /// Deliver a listener error to every registered listener.
    pub fn fail_listeners(&self, reason: &str) {
        self.notify(|| Err(Error::DataUnavailable(reason.to_string())));
    }

    /// Load a JSON array of car records and store each as a document.
    pub fn seed_from_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let cars: Vec<CarRecord> = serde_json::from_str(&contents)?;
        let count = cars.len();
        self.set_all(cars.iter().map(CarDocument::from_car).collect());
        info!(collection = %self.inner.name, count, "Seeded collection");
        Ok(count)
    }

    fn notify(&self, batch: impl Fn() -> Result<Vec<CarDocument>>) {
        let listeners: Vec<Arc<ChangeListener>> =
            self.inner.listeners.lock().values().cloned().collect();
        for listener in listeners {
            (listener.as_ref())(batch());
        }
    }

    fn matching(&self, predicate: impl Fn(&CarDocument) -> bool) -> Vec<CarDocument> {
        self.inner
            .docs
            .read()
            .values()
            .filter(|doc| predicate(doc))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CarCollection for MemoryCollection {
    async fn find_all(&self) -> Result<Vec<CarDocument>> {
        Ok(self.matching(|_| true))
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<CarDocument>> {
        Ok(self.matching(|doc| doc.brand.as_deref() == Some(brand)))
    }

    fn listen(&self, listener: ChangeListener) -> ListenerRegistration {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        let listener = Arc::new(listener);
        self.inner.listeners.lock().insert(id, listener.clone());

        (listener.as_ref())(Ok(self.matching(|_| true)));

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        ListenerRegistration::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().remove(&id);
            }
        })
    }
}
