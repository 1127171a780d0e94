//! Service assemblies over in-process collaborators.

use std::sync::Arc;
use std::time::Duration;

use carstream::adapter::outbound::cosmos::CosmosStore;
use carstream::adapter::outbound::firestore::{FirestoreStore, MemoryCollection};
use carstream::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use carstream::adapter::outbound::sqlite::SqliteCarRepository;
use carstream::application::{Backend, CloudData, VehicleBroadcaster};
use carstream::infrastructure::bootstrap::Services;
use carstream::port::{CarRepository, VehicleFeed};
use carstream::testkit::feed::ScriptedFeed;
use carstream::testkit::recording::{RecordingProducer, RecordingPublisher};

pub fn sqlite_repository(path: &std::path::Path) -> Arc<dyn CarRepository> {
    let pool = create_pool(path.to_str().expect("utf-8 path")).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    Arc::new(SqliteCarRepository::new(pool))
}

pub fn sqlite_store(path: &std::path::Path) -> CosmosStore {
    CosmosStore::new(sqlite_repository(path))
}

pub fn firestore_data(collection: &MemoryCollection, publisher: &RecordingPublisher) -> CloudData {
    let store = FirestoreStore::new(Arc::new(collection.clone()), Arc::new(publisher.clone()));
    CloudData::new(Backend::Firestore(store))
}

/// Services over `data` with a scripted feed and a recording producer.
pub fn services(data: CloudData, feed: ScriptedFeed, producer: &RecordingProducer) -> Services {
    let feed: Arc<dyn VehicleFeed> = Arc::new(feed);
    let broadcaster = VehicleBroadcaster::new(feed.clone(), Arc::new(producer.clone()))
        .with_delay(Duration::from_millis(5));
    Services::new(Arc::new(data), feed, broadcaster)
}
