use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;

use chain_hash::HashTable;
use chain_hash::HashTableBuilder;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 10)]
    initial_capacity: usize,

    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    #[arg(long = "max_load_factor", default_value_t = chain_hash::DEFAULT_MAX_LOAD_FACTOR)]
    max_load_factor: f64,

    #[arg(long = "max_collisions", default_value_t = chain_hash::DEFAULT_MAX_COLLISIONS)]
    max_collisions: usize,
}

fn main() -> chain_hash::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Creating HashTable with {} buckets (max load factor {}, max collisions {})",
        args.initial_capacity, args.max_load_factor, args.max_collisions
    );

    let mut table: HashTable<u64, u64, BuildHasherDefault<DefaultHasher>> =
        HashTableBuilder::default()
            .with_capacity(args.initial_capacity)
            .with_max_load_factor(args.max_load_factor)
            .with_max_collisions(args.max_collisions)
            .build()?;

    println!("Filling table with {} u64 values...", args.entries);
    let mut growths = 0;
    for value in 0..args.entries {
        let before = table.bucket_count();
        table.set(value, value);
        if table.bucket_count() != before {
            growths += 1;
        }
    }

    println!(
        "Inserted {} values, table grew {} times to {} buckets",
        table.len(),
        growths,
        table.bucket_count()
    );
    println!("Final load factor: {:.2}%", table.load_factor() * 100.0);

    table.debug_stats().print();
    table.print_chain_histogram();

    Ok(())
}
