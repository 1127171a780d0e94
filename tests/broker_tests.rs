use std::sync::Arc;
use std::time::Duration;

use carstream::application::{BroadcastReport, VehicleBroadcaster};
use carstream::port::{VehicleFeed, VEHICLE_TOPIC};
use carstream::testkit::domain::vehicle;
use carstream::testkit::feed::ScriptedFeed;
use carstream::testkit::recording::RecordingProducer;
use tokio::time::Instant;

fn broadcaster(feed: ScriptedFeed, producer: &RecordingProducer) -> VehicleBroadcaster {
    let feed: Arc<dyn VehicleFeed> = Arc::new(feed);
    VehicleBroadcaster::new(feed, Arc::new(producer.clone()))
}

#[tokio::test(start_paused = true)]
async fn three_records_are_spaced_and_all_attempted() {
    let feed = ScriptedFeed::of([vehicle(1, "Toyota"), vehicle(2, "Ford"), vehicle(3, "Kia")]);
    let producer = RecordingProducer::failing_on(&[2]);

    let started = Instant::now();
    let report = broadcaster(feed, &producer).broadcast().await;

    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(report, BroadcastReport { attempted: 3, failed: 1 });
    assert_eq!(producer.attempts(), 3);

    let stamps = producer.timestamps();
    assert!(stamps[1] - stamps[0] >= Duration::from_secs(1));
    assert!(stamps[2] - stamps[1] >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn messages_carry_topic_and_payload() {
    let feed = ScriptedFeed::of([vehicle(1, "Toyota")]);
    let producer = RecordingProducer::new();

    broadcaster(feed, &producer).broadcast().await;

    let messages = producer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].topic, VEHICLE_TOPIC);
    assert_eq!(messages[0].payload, vehicle(1, "Toyota"));
}

#[tokio::test(start_paused = true)]
async fn feed_error_stops_the_relay() {
    let feed = ScriptedFeed::of([vehicle(1, "Toyota")])
        .then_fail("connection reset")
        .then_vehicle(vehicle(2, "Ford"));
    let producer = RecordingProducer::new();

    let report = broadcaster(feed, &producer).broadcast().await;
    assert_eq!(report, BroadcastReport { attempted: 1, failed: 0 });
}

#[tokio::test(start_paused = true)]
async fn spawned_relay_runs_in_background() {
    let feed = ScriptedFeed::of([vehicle(1, "Toyota"), vehicle(2, "Ford")]);
    let producer = RecordingProducer::new();
    let broadcaster = Arc::new(
        broadcaster(feed, &producer)
            .with_delay(Duration::from_millis(250))
            .with_topic("cars"),
    );

    let handle = broadcaster.spawn();
    let report = handle.await.unwrap();

    assert_eq!(report.attempted, 2);
    assert!(producer.messages().iter().all(|m| m.topic == "cars"));
}
