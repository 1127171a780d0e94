//! Persistence port for the Firestore-style document collection.

use async_trait::async_trait;

use crate::domain::CarDocument;
use crate::error::Result;

/// Callback receiving one batch of changed documents, or a listener error.
///
/// May be invoked from any thread.
pub type ChangeListener = Box<dyn Fn(Result<Vec<CarDocument>>) + Send + Sync>;

/// A document collection with live change notifications.
#[async_trait]
pub trait CarCollection: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CarDocument>>;

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<CarDocument>>;

    /// Register `listener`. The first batch holds the current contents of
    /// the collection; each later batch holds the documents of one write.
    /// The listener stays registered until the returned handle is dropped.
    fn listen(&self, listener: ChangeListener) -> ListenerRegistration;
}

/// Keeps a change listener registered; dropping it unregisters.
pub struct ListenerRegistration {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ListenerRegistration {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
