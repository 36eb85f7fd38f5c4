use clap::{Parser, ValueEnum};
use log::info;
use multiset_bst::{Tree, TreeOps};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Asc,
    Desc,
    Shuffled,
}

#[derive(Parser)]
#[command(name = "bst-benchmark")]
#[command(about = "A multiset binary search tree performance testing tool")]
struct Args {
    #[arg(long, default_value = "1000000")]
    size: i32,

    /// Sorted orders degenerate the tree into a list, keep the size small for them
    #[arg(long, value_enum, default_value = "shuffled")]
    order: Order,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// Copies of each key to insert
    #[arg(long, default_value = "1")]
    duplicates: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut keys: Vec<i32> = (0..args.size).collect();
    match args.order {
        Order::Asc => {}
        Order::Desc => keys.reverse(),
        Order::Shuffled => {
            let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
            keys.shuffle(&mut rng);
        }
    }

    println!(
        "Running with {:?} order, {} keys and {} copies each",
        args.order, args.size, args.duplicates
    );

    let mut tree = Tree::empty();
    let start = Instant::now();
    for &key in keys.iter() {
        for _ in 0..args.duplicates {
            tree.insert(key);
        }
        assert!(tree.contains(&key));
    }
    assert_eq!(tree.len(), keys.len() * args.duplicates);
    info!(
        "built tree with {} nodes and height {:?}",
        tree.node_count(),
        tree.height()
    );
    if let (Some(min), Some(max)) = (tree.try_min(), tree.try_max()) {
        info!("keys span {min}..={max}");
    }

    let inserted = Instant::now();
    for key in keys.iter() {
        assert!(tree.contains(key));
    }
    let checked_contains = Instant::now();
    for key in keys.iter() {
        for _ in 0..args.duplicates {
            assert!(tree.remove(key));
        }
    }
    let end = Instant::now();
    assert!(tree.is_empty());

    println!(
        "Inserts took {} seconds",
        inserted.saturating_duration_since(start).as_secs_f32()
    );
    println!(
        "Checking contains took {} seconds",
        checked_contains
            .saturating_duration_since(inserted)
            .as_secs_f32()
    );
    println!(
        "Removals took {} seconds",
        end.saturating_duration_since(checked_contains)
            .as_secs_f32()
    );
    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
}
