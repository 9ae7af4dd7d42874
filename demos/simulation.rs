//! Boost-and-remove simulation
//!
//! Fills a queue with items of random priority, then repeatedly picks an
//! item whose priority falls inside a random window, boosts it just above
//! the current maximum, and dequeues it, until the queue is empty.
//!
//! ## Running
//!
//! ```bash
//! cargo run --example simulation -- --items 100 --seed 7
//! RUST_LOG=debug cargo run --example simulation
//! ```

use clap::Parser;
use dynamic_priority_queue::{PriorityQueue, QueueError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(about = "Boost random items to the top of a priority queue and remove them")]
struct Args {
    /// Number of items to enqueue before the simulation starts
    #[arg(long, default_value_t = 100)]
    items: u32,

    /// Seed for the random generator; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Lowest priority an item can be given
    #[arg(long, default_value_t = 150.0)]
    min_priority: f64,

    /// Highest priority an item can be given
    #[arg(long, default_value_t = 450.0)]
    max_priority: f64,
}

fn main() -> Result<(), QueueError> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (low, high) = if args.min_priority <= args.max_priority {
        (args.min_priority, args.max_priority)
    } else {
        (args.max_priority, args.min_priority)
    };
    let mut draw = move || {
        if low == high {
            low
        } else {
            rng.gen_range(low..high)
        }
    };

    let mut queue: PriorityQueue<u32, f64> = PriorityQueue::with_capacity(args.items as usize);
    for name in 1..=args.items {
        queue.enqueue(name, draw());
    }
    log::info!("enqueued {} items", queue.len());

    let mut rounds = 0u64;
    while !queue.is_empty() {
        rounds += 1;
        let (mut window_low, mut window_high) = (draw(), draw());
        if window_low > window_high {
            std::mem::swap(&mut window_low, &mut window_high);
        }

        let boost = queue.find_by(|e| e.priority >= window_low && e.priority <= window_high);
        let Some(before) = queue.get(boost).copied() else {
            log::debug!("round {}: no item in [{:.2}, {:.2}]", rounds, window_low, window_high);
            continue;
        };
        let Some(highest) = queue.peek().copied() else {
            break;
        };

        println!("Remaining highest priority: {}", highest);
        println!("boosted and removed...");
        println!("\tbefore : {}", before);
        queue.update(boost, highest.priority + 1.0)?;
        let top = queue.dequeue()?;
        println!("\tafter  : {}", top);
    }
    log::info!("queue drained after {} rounds", rounds);

    Ok(())
}
