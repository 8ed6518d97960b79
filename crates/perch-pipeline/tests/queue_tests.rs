use std::sync::Arc;
use std::time::Duration;

use perch_pipeline::DropQueue;

#[test]
fn test_capacity_one_rejects_second_publish() {
    let queue = DropQueue::with_capacity(1);
    assert_eq!(queue.try_push(1u32), Ok(()));
    // The queued value stays; the new one comes straight back.
    assert_eq!(queue.try_push(2u32), Err(2));
    assert_eq!(queue.dropped(), 1);
    assert_eq!(queue.try_pop(), Some(1));
    assert_eq!(queue.try_push(3u32), Ok(()));
    assert_eq!(queue.dropped(), 1);
}

#[test]
fn test_capacity_clamped_to_one() {
    let queue: DropQueue<u32> = DropQueue::with_capacity(0);
    assert_eq!(queue.capacity(), 1);
}

#[test]
fn test_fifo_order() {
    let queue = DropQueue::with_capacity(3);
    for value in 1..=3u32 {
        assert_eq!(queue.try_push(value), Ok(()));
    }
    assert_eq!(queue.try_pop(), Some(1));
    assert_eq!(queue.try_pop(), Some(2));
    assert_eq!(queue.try_pop(), Some(3));
    assert_eq!(queue.try_pop(), None);
}

#[test]
fn test_len_and_is_empty() {
    let queue = DropQueue::with_capacity(2);
    assert!(queue.is_empty());
    queue.try_push(1u32).unwrap();
    assert_eq!(queue.len(), 1);
    assert!(!queue.is_empty());
    queue.try_pop();
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_recv_sees_prior_push() {
    let queue = DropQueue::with_capacity(1);
    queue.try_push(4u32).unwrap();
    let value = tokio::time::timeout(Duration::from_secs(1), queue.recv())
        .await
        .unwrap();
    assert_eq!(value, 4);
}

#[tokio::test]
async fn test_recv_wakes_on_push() {
    let queue = Arc::new(DropQueue::with_capacity(1));
    let reader = queue.clone();
    let task = tokio::spawn(async move { reader.recv().await });
    tokio::task::yield_now().await;

    queue.try_push(6u32).unwrap();
    let value = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(value, 6);
}
