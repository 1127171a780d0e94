//! Vehicle feed port.

use crate::domain::stream::RecordStream;
use crate::domain::VehicleRecord;

/// Source of vehicle records.
///
/// `fetch` returns immediately; the request is issued when the stream is
/// first polled. An empty feed must surface as
/// [`Error::FeedUnavailable`](crate::error::Error::FeedUnavailable), never
/// as a stream that simply ends.
pub trait VehicleFeed: Send + Sync {
    fn fetch(&self) -> RecordStream<VehicleRecord>;
}
