//! Lazy record sequences.
//!
//! Every read path hands back a [`RecordStream`]: nothing runs until the
//! caller polls it, and dropping it stops production. The combinators here
//! carry the sequence rules shared by all backends: deferred queries,
//! distinctness, and turning an empty result into an error.

use std::collections::HashSet;
use std::future::{ready, Future};
use std::hash::Hash;

use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::error::{Error, Result};

/// A boxed, lazily evaluated sequence of records or errors.
pub type RecordStream<T> = BoxStream<'static, Result<T>>;

/// Run `query` on first poll and yield its rows one at a time.
pub fn deferred<T, F>(query: F) -> RecordStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    stream::once(query)
        .map_ok(|rows| stream::iter(rows.into_iter().map(Ok::<T, Error>)))
        .try_flatten()
        .boxed()
}

/// Drop every item whose key was already yielded. Errors pass through.
pub fn distinct_by<T, K, F>(records: RecordStream<T>, mut key: F) -> RecordStream<T>
where
    T: Send + 'static,
    K: Eq + Hash + Send + 'static,
    F: FnMut(&T) -> K + Send + 'static,
{
    let mut seen = HashSet::new();
    records
        .filter(move |item| {
            ready(match item {
                Ok(value) => seen.insert(key(value)),
                Err(_) => true,
            })
        })
        .boxed()
}

/// [`distinct_by`] keyed on the item itself.
pub fn distinct<T>(records: RecordStream<T>) -> RecordStream<T>
where
    T: Eq + Hash + Clone + Send + 'static,
{
    distinct_by(records, T::clone)
}

/// Yield `on_empty()` as the only item if `records` completes without
/// producing anything.
pub fn error_if_empty<T, F>(records: RecordStream<T>, on_empty: F) -> RecordStream<T>
where
    T: Send + 'static,
    F: FnOnce() -> Error + Send + 'static,
{
    stream::unfold(
        (records.fuse(), false, Some(on_empty)),
        |(mut records, yielded, mut on_empty)| async move {
            match records.next().await {
                Some(item) => Some((item, (records, true, on_empty))),
                None if !yielded => on_empty.take().map(|f| (Err(f()), (records, true, None))),
                None => None,
            }
        },
    )
    .boxed()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn from_items<T: Send + 'static>(items: Vec<Result<T>>) -> RecordStream<T> {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn deferred_runs_query_only_when_polled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut records = deferred(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(records.next().await.unwrap().unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let rest: Vec<i32> = records.try_collect().await.unwrap();
        assert_eq!(rest, vec![2, 3]);
    }

    #[tokio::test]
    async fn deferred_propagates_query_error() {
        let records = deferred::<i32, _>(async { Err(Error::DataUnavailable("down".into())) });
        let result: Result<Vec<i32>> = records.try_collect().await;
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn distinct_keeps_first_occurrence_in_order() {
        let records = from_items(vec![Ok("b"), Ok("a"), Ok("b"), Ok("c"), Ok("a")]);
        let out: Vec<&str> = distinct(records).try_collect().await.unwrap();
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn distinct_by_passes_errors_through() {
        let records = from_items(vec![
            Ok(1),
            Err(Error::DataUnavailable("x".into())),
            Ok(1),
        ]);
        let out: Vec<Result<i32>> = distinct_by(records, |v| *v).collect().await;
        assert_eq!(out.len(), 2);
        assert!(out[1].is_err());
    }

    #[tokio::test]
    async fn error_if_empty_replaces_empty_completion() {
        let records = error_if_empty(from_items::<i32>(vec![]), || {
            Error::NotFound("nothing".into())
        });
        let out: Vec<Result<i32>> = records.collect().await;
        assert_eq!(out.len(), 1);
        assert!(out[0].as_ref().unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn error_if_empty_leaves_non_empty_untouched() {
        let records = error_if_empty(from_items(vec![Ok(7), Ok(8)]), || {
            Error::NotFound("nothing".into())
        });
        let out: Vec<i32> = records.try_collect().await.unwrap();
        assert_eq!(out, vec![7, 8]);
    }

    #[tokio::test]
    async fn error_if_empty_does_not_mask_an_error_item() {
        let records = error_if_empty(
            from_items::<i32>(vec![Err(Error::DataUnavailable("down".into()))]),
            || Error::NotFound("nothing".into()),
        );
        let out: Vec<Result<i32>> = records.collect().await;
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Err(Error::DataUnavailable(_))));
    }
}
