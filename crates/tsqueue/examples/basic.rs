use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tsqueue_rs::{BoundedBlockingQueue, TryInsert};

fn main() {
    println!("tsqueue Basic Example");
    println!("=====================\n");

    const N_PRODUCERS: usize = 4;
    const N_CONSUMERS: usize = 2;
    const ITEMS_PER_PRODUCER: usize = 250_000;
    const CAPACITY: usize = 256;

    let queue = Arc::new(BoundedBlockingQueue::<u64>::new(CAPACITY).expect("capacity is non-zero"));

    println!("Configuration:");
    println!("  Producers: {}", N_PRODUCERS);
    println!("  Consumers: {}", N_CONSUMERS);
    println!("  Capacity: {}", CAPACITY);
    println!("  Total items: {}\n", N_PRODUCERS * ITEMS_PER_PRODUCER);

    let start = Instant::now();

    // Spawn producer threads
    let mut producers = vec![];
    for id in 0..N_PRODUCERS {
        let q = Arc::clone(&queue);
        producers.push(thread::spawn(move || {
            let mut backpressured = 0usize;
            for i in 0..ITEMS_PER_PRODUCER {
                let value = (id * ITEMS_PER_PRODUCER + i) as u64;
                // Fast path first; fall back to blocking when the queue is full
                if let TryInsert::Full(value) = q.try_insert(value).unwrap() {
                    backpressured += 1;
                    q.blocking_insert(value).unwrap();
                }
            }
            println!("Producer {} finished ({} inserts hit backpressure)", id, backpressured);
        }));
    }

    // Consumers run until shutdown and the queue is drained
    let consumers: Vec<_> = (0..N_CONSUMERS)
        .map(|_| {
            let q = Arc::clone(&queue);
            thread::spawn(move || {
                let mut total = 0usize;
                let mut sum = 0u64;
                while let Ok(item) = q.blocking_remove() {
                    total += 1;
                    sum += item;
                }
                (total, sum)
            })
        })
        .collect();

    for handle in producers {
        handle.join().unwrap();
    }
    queue.shutdown();

    let (total, sum) = consumers
        .into_iter()
        .map(|h| h.join().unwrap())
        .fold((0, 0), |(t, s), (n, x)| (t + n, s + x));
    let duration = start.elapsed();

    queue.clear();

    println!("\nResults:");
    println!("  Items consumed: {}", total);
    println!("  Sum: {}", sum);
    println!("  Final size: {}", queue.len());
    println!("  Duration: {:.2?}", duration);
    println!(
        "  Throughput: {:.2} million items/sec",
        total as f64 / duration.as_secs_f64() / 1_000_000.0
    );
}
