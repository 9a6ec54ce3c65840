use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chain_hash::bag_of_words::BAG_OF_WORDS_CAPACITY;
use chain_hash::bag_of_words::bag_of_words_with_capacity;
use chain_hash::bag_of_words::write_bag_of_words;
use clap::Parser;

const SAMPLE_DOCUMENTS: [&str; 4] = [
    "La casa es grande",
    "El gato está en la casa",
    "La casa es bonita y grande",
    "El sol brilla sobre la casa",
];

/// Lists, for every word, the documents it appears in.
#[derive(Parser, Debug)]
struct Args {
    /// Initial number of buckets in the word table
    #[arg(short = 'c', long = "capacity", default_value_t = BAG_OF_WORDS_CAPACITY)]
    capacity: usize,

    /// Read one document per file instead of using the built-in sample
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let documents: Vec<String> = if args.files.is_empty() {
        SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()).collect()
    } else {
        args.files
            .iter()
            .map(fs::read_to_string)
            .collect::<Result<Vec<_>, _>>()?
    };

    println!("Input documents:");
    for (index, document) in documents.iter().enumerate() {
        println!("[{}] \"{}\"", index, document.trim_end());
    }
    println!();

    let bow = bag_of_words_with_capacity(&documents, args.capacity);

    let mut out = String::new();
    write_bag_of_words(&mut out, &bow)?;
    println!("Bag of words (word -> [documents]):");
    print!("{out}");
    println!(
        "{} words in {} buckets ({} in use)",
        bow.len(),
        bow.bucket_count(),
        bow.used_buckets()
    );

    Ok(())
}
