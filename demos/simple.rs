//! Walkthrough of the priority queue API
//!
//! Builds a small queue, looks entries up, boosts priorities in place, and
//! drains it, printing the heap array after every step.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=trace cargo run --example simple
//! ```

use std::fmt::Display;

use dynamic_priority_queue::{PriorityQueue, QueueError};

fn report<V: Display, P: Display>(title: &str, queue: &PriorityQueue<V, P>) {
    if !title.is_empty() {
        println!("{}", title);
    }
    println!("{}", queue);
}

fn main() -> Result<(), QueueError> {
    env_logger::init();

    let mut queue: PriorityQueue<String> = PriorityQueue::new();
    for (value, priority) in [("a", 1), ("b", 2), ("c", 3), ("d", 1), ("e", 4), ("f", 2)] {
        queue.enqueue(value.to_string(), priority);
    }

    let found = queue.find_by(|entry| entry.value.as_str() < "d");
    if let Some(entry) = queue.get(found) {
        println!("--- Found item using find_by(...): {}", entry);
        println!();
    }

    let a = queue.find("a");
    report("--- Before ---", &queue);
    queue.update(a, 5)?;
    report("--- After Updating a ---", &queue);

    for priority in 3..=6 {
        queue.update(queue.find("b"), priority)?;
        report("--- After Updating b ---", &queue);
    }

    println!("--- Emptying The Queue ---");
    while !queue.is_empty() {
        let top = queue.dequeue()?;
        log::debug!("dequeued {}", top);
        report("", &queue);
    }

    let batch: PriorityQueue<String> = [("a", 1), ("b", 2), ("c", 3), ("d", 1), ("e", 4), ("f", 2)]
        .into_iter()
        .map(|(value, priority)| (value.to_string(), priority))
        .collect();
    report("--- Initialized from a batch ---", &batch);

    Ok(())
}
