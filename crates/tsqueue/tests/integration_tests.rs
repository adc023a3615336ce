//! End-to-end behaviour of the queue under real OS threads.

#![cfg(not(loom))]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tsqueue_rs::{BoundedBlockingQueue, QueueError, TryInsert};

/// Upper bound for a blocked call to observe shutdown.
const LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn test_try_insert_backpressure_then_room() {
    let queue = BoundedBlockingQueue::new(2).unwrap();

    assert_eq!(queue.try_insert(10), Ok(TryInsert::Inserted));
    assert_eq!(queue.try_insert(20), Ok(TryInsert::Inserted));
    assert_eq!(queue.try_insert(30), Ok(TryInsert::Full(30)));

    assert_eq!(queue.try_remove(), Ok(Some(10)));
    assert_eq!(queue.try_insert(30), Ok(TryInsert::Inserted));

    // Remaining content, oldest first
    assert_eq!(queue.try_remove(), Ok(Some(20)));
    assert_eq!(queue.try_remove(), Ok(Some(30)));
    assert_eq!(queue.try_remove(), Ok(None));
}

#[test]
fn test_shutdown_unblocks_blocked_remove() {
    let queue = Arc::new(BoundedBlockingQueue::<u32>::new(1).unwrap());
    let (tx, rx) = mpsc::channel();

    let consumer = {
        let q = Arc::clone(&queue);
        thread::spawn(move || {
            tx.send(q.blocking_remove()).unwrap();
        })
    };

    // Give the consumer time to park on the empty queue
    thread::sleep(Duration::from_millis(50));
    queue.shutdown();

    let result = rx
        .recv_timeout(LIVENESS_TIMEOUT)
        .expect("blocked remove did not return after shutdown");
    assert_eq!(result, Err(QueueError::Inactive));
    consumer.join().unwrap();
}

#[test]
fn test_shutdown_unblocks_blocked_insert() {
    let queue = Arc::new(BoundedBlockingQueue::new(1).unwrap());
    queue.blocking_insert(1u32).unwrap();
    let (tx, rx) = mpsc::channel();

    let producer = {
        let q = Arc::clone(&queue);
        thread::spawn(move || {
            tx.send(q.blocking_insert(2)).unwrap();
        })
    };

    thread::sleep(Duration::from_millis(50));
    queue.shutdown();

    let result = rx
        .recv_timeout(LIVENESS_TIMEOUT)
        .expect("blocked insert did not return after shutdown");
    assert_eq!(result, Err(QueueError::Inactive));
    producer.join().unwrap();

    // The rejected item was never enqueued
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_shutdown_wakes_every_waiter() {
    const N_CONSUMERS: usize = 8;

    let queue = Arc::new(BoundedBlockingQueue::<u32>::new(4).unwrap());
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..N_CONSUMERS)
        .map(|_| {
            let q = Arc::clone(&queue);
            let tx = tx.clone();
            thread::spawn(move || tx.send(q.blocking_remove()).unwrap())
        })
        .collect();
    drop(tx);

    thread::sleep(Duration::from_millis(50));
    queue.shutdown();

    for _ in 0..N_CONSUMERS {
        let result = rx
            .recv_timeout(LIVENESS_TIMEOUT)
            .expect("a blocked consumer was left behind by shutdown");
        assert_eq!(result, Err(QueueError::Inactive));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_pending_items_drain_after_shutdown() {
    let queue = Arc::new(BoundedBlockingQueue::new(5).unwrap());

    let producer = {
        let q = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..5u32 {
                q.blocking_insert(i).unwrap();
            }
            q.shutdown();
        })
    };
    producer.join().unwrap();

    assert!(!queue.is_active());
    let late_consumer = {
        let q = Arc::clone(&queue);
        thread::spawn(move || {
            let mut drained = Vec::new();
            loop {
                match q.blocking_remove() {
                    Ok(item) => drained.push(item),
                    Err(e) => return (drained, e),
                }
            }
        })
    };

    let (drained, err) = late_consumer.join().unwrap();
    assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    assert_eq!(err, QueueError::Inactive);
}

#[test]
fn test_shutdown_then_clear_empties_queue() {
    let queue = BoundedBlockingQueue::new(8).unwrap();
    for i in 0..6u32 {
        queue.blocking_insert(i).unwrap();
    }

    queue.clear();
    assert_eq!(queue.len(), 6, "clear must not drain an active queue");

    queue.shutdown();
    queue.clear();
    assert_eq!(queue.len(), 0);
    assert!(!queue.is_full());
}

#[test]
fn test_fifo_ordering_multi_producer() {
    const N_PRODUCERS: usize = 4;
    const ITEMS_PER_PRODUCER: u64 = 2_000;

    let queue = BoundedBlockingQueue::<(usize, u64)>::new(16).unwrap();
    let mut last_seen = vec![None::<u64>; N_PRODUCERS];

    thread::scope(|s| {
        for producer_id in 0..N_PRODUCERS {
            let q = &queue;
            s.spawn(move || {
                for i in 0..ITEMS_PER_PRODUCER {
                    q.blocking_insert((producer_id, i)).unwrap();
                }
            });
        }

        for _ in 0..N_PRODUCERS * ITEMS_PER_PRODUCER as usize {
            let (producer_id, value) = queue.blocking_remove().unwrap();
            let expected = last_seen[producer_id].map_or(0, |v| v + 1);
            assert_eq!(
                value, expected,
                "FIFO violation for producer {}: expected {}, got {}",
                producer_id, expected, value
            );
            last_seen[producer_id] = Some(value);
        }
    });

    for (id, last) in last_seen.iter().enumerate() {
        assert_eq!(*last, Some(ITEMS_PER_PRODUCER - 1), "producer {} incomplete", id);
    }
    assert!(queue.is_empty());
}

#[test]
fn test_concurrent_stress_with_shutdown() {
    const N_PRODUCERS: usize = 6;
    const N_CONSUMERS: usize = 6;
    const CAPACITY: usize = 8;

    let queue = Arc::new(BoundedBlockingQueue::<u64>::new(CAPACITY).unwrap());
    let running = Arc::new(AtomicBool::new(true));
    let max_seen = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..N_PRODUCERS)
        .map(|id| {
            let q = Arc::clone(&queue);
            let running = Arc::clone(&running);
            let max_seen = Arc::clone(&max_seen);
            thread::spawn(move || {
                let mut sent = 0u64;
                while running.load(Ordering::Acquire) {
                    let value = ((id as u64) << 32) | sent;
                    let outcome = match q.try_insert(value) {
                        Ok(TryInsert::Inserted) => Ok(()),
                        Ok(TryInsert::Full(value)) => q.blocking_insert(value),
                        Err(e) => Err(e),
                    };
                    match outcome {
                        Ok(()) => sent += 1,
                        Err(e) => {
                            assert!(e.is_terminal());
                            break;
                        }
                    }
                    max_seen.fetch_max(q.len(), Ordering::Relaxed);
                }
                sent
            })
        })
        .collect();

    let consumers: Vec<_> = (0..N_CONSUMERS)
        .map(|_| {
            let q = Arc::clone(&queue);
            thread::spawn(move || {
                let mut received = 0u64;
                while q.blocking_remove().is_ok() {
                    received += 1;
                }
                received
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(200));
    running.store(false, Ordering::Release);
    queue.shutdown();

    let sent: u64 = producers.into_iter().map(|h| h.join().unwrap()).sum();
    let received: u64 = consumers.into_iter().map(|h| h.join().unwrap()).sum();

    // Consumers drain everything that made it in before shutdown
    assert_eq!(sent, received);
    assert!(max_seen.load(Ordering::Relaxed) <= CAPACITY);

    queue.clear();
    assert_eq!(queue.len(), 0);
}
