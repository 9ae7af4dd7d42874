//! Stress tests that push the queue through large numbers of operations
//!
//! These tests perform long operation sequences in various patterns to catch
//! edge cases and verify the heap stays consistent under load.

use dynamic_priority_queue::{GrowthPolicy, PriorityQueue};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn assert_heap_order<V, P: PartialOrd + std::fmt::Debug>(queue: &PriorityQueue<V, P>) {
    let priorities: Vec<&P> = queue.iter().map(|e| &e.priority).collect();
    for i in 1..priorities.len() {
        let parent = (i - 1) / 2;
        assert!(
            priorities[i] <= priorities[parent],
            "heap order broken at {}: {:?} > {:?}",
            i,
            priorities[i],
            priorities[parent]
        );
    }
}

/// Test massive numbers of enqueues and dequeues
#[test]
fn test_massive_operations() {
    let mut queue = PriorityQueue::new();

    for i in 0..1000u32 {
        queue.enqueue(i, i);
    }
    assert_eq!(queue.len(), 1000);

    for i in (0..1000u32).rev() {
        let entry = queue.dequeue().unwrap();
        assert_eq!((entry.value, entry.priority), (i, i));
    }
    assert!(queue.is_empty());
}

/// Test descending insertion, where no sift-up ever moves anything
#[test]
fn test_descending_insertion() {
    let mut queue = PriorityQueue::new();
    for i in (0..500u32).rev() {
        queue.enqueue(i, i);
    }
    assert_heap_order(&queue);

    let drained: Vec<u32> = queue.into_sorted_vec().into_iter().map(|e| e.value).collect();
    let expected: Vec<u32> = (0..500).rev().collect();
    assert_eq!(drained, expected);
}

/// Test many updates in both directions
#[test]
fn test_many_updates() {
    let mut queue = PriorityQueue::new();
    for i in 0..500u32 {
        queue.enqueue(i, 10_000 + i);
    }

    // flip the order: smaller values get larger priorities
    for i in 0..500u32 {
        let cursor = queue.find(&i);
        queue.update(cursor, 1000 - i).unwrap();
        assert_heap_order(&queue);
    }

    for i in 0..500u32 {
        let entry = queue.dequeue().unwrap();
        assert_eq!(entry.value, i);
    }
}

/// Test alternating enqueue and dequeue
#[test]
fn test_alternating_ops() {
    let mut queue = PriorityQueue::new();

    for i in 0..200u32 {
        queue.enqueue(i, i * 2);
        queue.enqueue(i + 1000, i * 2 + 1);
        assert!(queue.dequeue().is_ok());
        assert_heap_order(&queue);
    }

    assert_eq!(queue.len(), 200);
    let mut last = u32::MAX;
    while let Ok(entry) = queue.dequeue() {
        assert!(entry.priority <= last);
        last = entry.priority;
    }
}

/// Test boosting random entries to the top and removing them
#[test]
fn test_boost_and_remove() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut queue: PriorityQueue<u32, f64> = PriorityQueue::new();

    for name in 1..=300u32 {
        queue.enqueue(name, rng.gen_range(100.0..500.0));
    }

    let mut removed = 0;
    while !queue.is_empty() {
        let low: f64 = rng.gen_range(100.0..500.0);
        let high: f64 = rng.gen_range(low..=500.0);
        let cursor = queue.find_by(|e| e.priority >= low && e.priority <= high);
        if cursor == queue.end() {
            continue;
        }

        let target = queue.get(cursor).unwrap().value;
        let boosted = queue.peek().unwrap().priority + 1.0;
        queue.update(cursor, boosted).unwrap();

        let top = queue.dequeue().unwrap();
        assert_eq!(top.value, target);
        assert_eq!(top.priority, boosted);
        assert_heap_order(&queue);
        removed += 1;
    }
    assert_eq!(removed, 300);
}

/// Test random mixed workload against a sorted reference
#[test]
fn test_random_workload_matches_reference() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut queue = PriorityQueue::new();
    let mut reference: Vec<(u32, u32)> = Vec::new();
    let mut next_value = 0u32;

    for _ in 0..5000 {
        match rng.gen_range(0..10) {
            0..=4 => {
                let priority = rng.gen_range(0..1000);
                queue.enqueue(next_value, priority);
                reference.push((next_value, priority));
                next_value += 1;
            }
            5..=7 => {
                let expected_max = reference.iter().map(|&(_, p)| p).max();
                match queue.dequeue() {
                    Ok(entry) => {
                        assert_eq!(Some(entry.priority), expected_max);
                        let pos = reference
                            .iter()
                            .position(|&(v, _)| v == entry.value)
                            .unwrap();
                        reference.swap_remove(pos);
                    }
                    Err(_) => assert!(reference.is_empty()),
                }
            }
            _ => {
                if reference.is_empty() {
                    continue;
                }
                let pick = rng.gen_range(0..reference.len());
                let priority = rng.gen_range(0..1000);
                let cursor = queue.find(&reference[pick].0);
                queue.update(cursor, priority).unwrap();
                reference[pick].1 = priority;
            }
        }
        assert_eq!(queue.len(), reference.len());
    }
    assert_heap_order(&queue);
}

/// Test growth under tight and generous policies
#[test]
fn test_growth_policies() {
    for policy in [
        GrowthPolicy::default(),
        GrowthPolicy::new(1.0, 1),
        GrowthPolicy::new(2.0, 0),
        GrowthPolicy::new(0.0, 0),
    ] {
        let mut queue = PriorityQueue::with_growth_policy(policy);
        for i in 0..300u32 {
            queue.enqueue(i, i % 17);
            assert!(queue.capacity() >= queue.len());
        }
        assert_eq!(queue.growth_policy(), policy);
        assert_heap_order(&queue);
        assert_eq!(queue.len(), 300);
    }
}

/// Test batch construction of a large shuffled input
#[test]
fn test_large_batch_construction() {
    let mut rng = SmallRng::seed_from_u64(7);
    let entries: Vec<(u32, u32)> = (0..2000).map(|i| (i, rng.gen_range(0..100))).collect();

    let queue: PriorityQueue<u32> = entries.iter().copied().collect();
    assert_heap_order(&queue);

    let mut expected: Vec<u32> = entries.iter().map(|&(_, p)| p).collect();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    let drained: Vec<u32> = queue.into_sorted_vec().into_iter().map(|e| e.priority).collect();
    assert_eq!(drained, expected);
}
