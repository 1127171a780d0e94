//! Car store backed by a document collection with live notifications.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::domain::stream::{deferred, distinct, distinct_by, error_if_empty, RecordStream};
use crate::domain::{BrandSummary, CarDocument, CarRecord};
use crate::error::{Error, Result};
use crate::port::{CarCollection, CarStore, ChangeListener, TopicPublisher};

/// [`CarStore`] over a [`CarCollection`], pushing writes to a pub/sub topic.
pub struct FirestoreStore {
    collection: Arc<dyn CarCollection>,
    publisher: Arc<dyn TopicPublisher>,
}

impl FirestoreStore {
    #[must_use]
    pub fn new(collection: Arc<dyn CarCollection>, publisher: Arc<dyn TopicPublisher>) -> Self {
        Self {
            collection,
            publisher,
        }
    }

    /// Publish `car` as indented JSON to the pub/sub topic.
    ///
    /// Serialization and publish failures surface as
    /// [`Error::PublishFailure`].
    pub async fn push(&self, car: &CarRecord) -> Result<()> {
        let payload =
            serde_json::to_vec_pretty(car).map_err(|e| Error::PublishFailure(e.to_string()))?;

        let message_id = self.publisher.publish(payload).await.map_err(|e| match e {
            Error::PublishFailure(_) => e,
            other => Error::PublishFailure(other.to_string()),
        })?;

        debug!(car_id = car.car_id, message_id = %message_id, "Published car");
        Ok(())
    }

    /// Every brand as it first appears in the collection, each exactly once.
    ///
    /// The first event batch covers the current contents; later batches come
    /// from writes. The stream never ends on its own; dropping it removes
    /// the change listener. A listener error is yielded once as
    /// [`Error::DataUnavailable`] and ends the stream.
    pub fn stream_brand_events(&self) -> RecordStream<BrandSummary> {
        let (tx, rx) = mpsc::unbounded_channel::<Result<BrandSummary>>();
        let seen: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
        let runtime = Handle::try_current().ok();
        let listener_tx = tx.clone();

        let listener: ChangeListener = Box::new(move |batch: Result<Vec<CarDocument>>| match batch {
            Err(err) => {
                error!(error = %err, "Error in collection change listener");
                let _ = listener_tx.send(Err(Error::DataUnavailable(err.to_string())));
            }
            Ok(docs) => {
                for brand in docs.into_iter().filter_map(|doc| doc.brand) {
                    if !seen.lock().insert(brand.clone()) {
                        continue;
                    }
                    let event = Ok(BrandSummary::new(brand));
                    match &runtime {
                        Some(handle) => {
                            let tx = listener_tx.clone();
                            handle.spawn(async move {
                                let _ = tx.send(event);
                            });
                        }
                        None => {
                            let _ = listener_tx.send(event);
                        }
                    }
                }
            }
        });

        let registration = self.collection.listen(listener);
        info!("Brand event stream subscribed");

        // `tx` rides along in the state so the channel never closes.
        stream::unfold(Some((rx, registration, tx)), |state| async move {
            let (mut rx, registration, tx) = state?;
            let item = rx.recv().await?;
            let next = item.is_ok().then_some((rx, registration, tx));
            Some((item, next))
        })
        .boxed()
    }
}

impl CarStore for FirestoreStore {
    fn find_all_brands(&self) -> RecordStream<BrandSummary> {
        let collection = self.collection.clone();
        let brands = deferred(async move {
            info!("Hitting DB");
            let docs = collection.find_all().await?;
            Ok(docs
                .into_iter()
                .filter_map(|doc| doc.brand)
                .map(BrandSummary::new)
                .collect())
        })
        .map_err(|err| {
            error!(error = %err, "Error while retrieving data from DB");
            Error::DataUnavailable("failed to retrieve car brands".into())
        })
        .boxed();

        error_if_empty(distinct(brands), || {
            Error::NotFound("no car brands stored".into())
        })
    }

    fn find_by_brand(&self, brand: &str) -> RecordStream<CarRecord> {
        let collection = self.collection.clone();
        let brand = brand.to_string();
        let missing = brand.clone();
        let cars = deferred(async move {
            let docs = collection.find_by_brand(&brand).await?;
            info!(brand = %brand, count = docs.len(), "Fetched car details");
            Ok(docs.iter().map(|doc| doc.to_car()).collect())
        })
        .map_err(|err| {
            error!(error = %err, "Error while retrieving data from DB");
            Error::DataUnavailable("failed to retrieve car details".into())
        })
        .boxed();

        error_if_empty(distinct_by(cars, CarRecord::key), move || {
            Error::NotFound(format!("no cars of brand {missing}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use futures_util::TryStreamExt;

    use super::*;
    use crate::adapter::outbound::firestore::MemoryCollection;

    #[derive(Default)]
    struct CapturingPublisher {
        fail: bool,
        published: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl TopicPublisher for CapturingPublisher {
        async fn publish(&self, data: Vec<u8>) -> Result<String> {
            if self.fail {
                return Err(Error::DataUnavailable("topic deleted".into()));
            }
            self.published.lock().push(data);
            Ok("msg-1".into())
        }

        async fn shutdown(&self, _timeout: Duration) -> Result<()> {
            Ok(())
        }
    }

    fn car(id: i64, brand: &str) -> CarRecord {
        CarRecord {
            car_id: id,
            brand: brand.into(),
            model: "Corolla".into(),
            year: 2019,
            color: "White".into(),
            mileage: 1200.0,
            price: 15000.0,
        }
    }

    fn store_with(collection: &MemoryCollection) -> FirestoreStore {
        FirestoreStore::new(
            Arc::new(collection.clone()),
            Arc::new(CapturingPublisher::default()),
        )
    }

    #[tokio::test]
    async fn brands_skip_missing_and_repeat() {
        let collection = MemoryCollection::new("Car");
        collection.set(CarDocument::from_car(&car(1, "Toyota")));
        collection.set(CarDocument::from_car(&car(2, "Toyota")));
        collection.set(CarDocument::from_car(&car(3, "Ford")));
        collection.set(CarDocument {
            document_id: "4".into(),
            ..CarDocument::default()
        });

        let mut brands: Vec<String> = store_with(&collection)
            .find_all_brands()
            .map_ok(|b| b.brand)
            .try_collect()
            .await
            .unwrap();
        brands.sort();
        assert_eq!(brands, vec!["Ford", "Toyota"]);
    }

    #[tokio::test]
    async fn empty_collection_is_not_found() {
        let collection = MemoryCollection::new("Car");
        let result: Result<Vec<BrandSummary>> =
            store_with(&collection).find_all_brands().try_collect().await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn cars_of_unknown_brand_are_not_found() {
        let collection = MemoryCollection::new("Car");
        collection.set(CarDocument::from_car(&car(1, "Toyota")));
        let result: Result<Vec<CarRecord>> =
            store_with(&collection).find_by_brand("Lada").try_collect().await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn push_publishes_pretty_json() {
        let publisher = Arc::new(CapturingPublisher::default());
        let store = FirestoreStore::new(Arc::new(MemoryCollection::new("Car")), publisher.clone());

        store.push(&car(7, "Mazda")).await.unwrap();

        let published = publisher.published.lock();
        assert_eq!(published.len(), 1);
        let text = String::from_utf8(published[0].clone()).unwrap();
        assert!(text.contains('\n'));
        let decoded: CarRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, car(7, "Mazda"));
    }

    #[tokio::test]
    async fn push_failure_surfaces_as_publish_failure() {
        let publisher = Arc::new(CapturingPublisher {
            fail: true,
            ..CapturingPublisher::default()
        });
        let store = FirestoreStore::new(Arc::new(MemoryCollection::new("Car")), publisher);

        let result = store.push(&car(7, "Mazda")).await;
        assert!(matches!(result, Err(Error::PublishFailure(msg)) if msg.contains("topic deleted")));
    }

    #[tokio::test]
    async fn brand_events_yield_each_brand_once() {
        let collection = MemoryCollection::new("Car");
        collection.set(CarDocument::from_car(&car(1, "Toyota")));
        let store = store_with(&collection);

        let mut events = store.stream_brand_events();
        assert_eq!(events.next().await.unwrap().unwrap().brand, "Toyota");

        collection.set(CarDocument::from_car(&car(2, "Ford")));
        collection.set(CarDocument::from_car(&car(3, "Toyota")));
        collection.set(CarDocument::from_car(&car(4, "Kia")));

        let mut later = vec![
            events.next().await.unwrap().unwrap().brand,
            events.next().await.unwrap().unwrap().brand,
        ];
        later.sort();
        assert_eq!(later, vec!["Ford", "Kia"]);

        let idle = tokio::time::timeout(Duration::from_millis(50), events.next()).await;
        assert!(idle.is_err(), "stream should stay open without new brands");
    }

    #[tokio::test]
    async fn dropping_brand_events_unregisters_listener() {
        let collection = MemoryCollection::new("Car");
        let store = store_with(&collection);

        let events = store.stream_brand_events();
        assert_eq!(collection.listener_count(), 1);
        drop(events);
        assert_eq!(collection.listener_count(), 0);
    }

    #[tokio::test]
    async fn listener_error_is_yielded_once_then_ends() {
        let collection = MemoryCollection::new("Car");
        let store = store_with(&collection);

        let mut events = store.stream_brand_events();
        collection.fail_listeners("permission denied");

        assert!(matches!(
            events.next().await,
            Some(Err(Error::DataUnavailable(_)))
        ));
        assert!(events.next().await.is_none());
    }
}
