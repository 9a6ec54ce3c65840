use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;

use log::debug;

use crate::DefaultHashBuilder;
use crate::HashTable;

/// Bucket count of the tables created by [`bag_of_words`].
pub const BAG_OF_WORDS_CAPACITY: usize = 13;

/// Maps each word to the indices of the documents containing it, in the
/// order the documents were added.
pub type BagOfWords<S = DefaultHashBuilder> = HashTable<String, Vec<usize>, S>;

/// Splits `text` on whitespace and normalizes every piece: characters that
/// are not alphanumeric are dropped and the rest lowercased. Pieces left
/// empty are skipped.
///
/// # Examples
///
/// ```rust
/// # use chain_hash::bag_of_words::tokenize;
/// #
/// assert_eq!(tokenize("La casa, es GRANDE!  --"), ["la", "casa", "es", "grande"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Records every word of `text` as appearing in document `index`.
///
/// The index is appended to a word's list only if it is not already there,
/// so repeated words within a document are counted once and lists keep
/// first-seen order.
pub fn add_document<S: BuildHasher>(table: &mut BagOfWords<S>, index: usize, text: &str) {
    for word in tokenize(text) {
        match table.get_mut(word.as_str()) {
            Ok(documents) => {
                if !documents.contains(&index) {
                    documents.push(index);
                }
            }
            Err(_) => {
                table.set(word, vec![index]);
            }
        }
    }
}

/// Builds the word-to-documents table for `documents` in a table of
/// [`BAG_OF_WORDS_CAPACITY`] buckets. Document indices are positions in the
/// slice.
///
/// # Examples
///
/// ```rust
/// # use chain_hash::bag_of_words::bag_of_words;
/// #
/// let bow = bag_of_words(&["La casa es grande", "El gato está en la casa"]);
/// assert_eq!(bow.get("casa"), Ok(&vec![0, 1]));
/// assert_eq!(bow.get("gato"), Ok(&vec![1]));
/// ```
#[cfg(any(feature = "foldhash", feature = "std"))]
pub fn bag_of_words<D: AsRef<str>>(documents: &[D]) -> BagOfWords {
    bag_of_words_with_capacity(documents, BAG_OF_WORDS_CAPACITY)
}

/// Like [`bag_of_words`] with a caller-chosen initial bucket count.
#[cfg(any(feature = "foldhash", feature = "std"))]
pub fn bag_of_words_with_capacity<D: AsRef<str>>(documents: &[D], capacity: usize) -> BagOfWords {
    bag_of_words_with_hasher(documents, capacity, DefaultHashBuilder::default())
}

/// Like [`bag_of_words_with_capacity`] with an explicit hasher builder.
pub fn bag_of_words_with_hasher<D, S>(
    documents: &[D],
    capacity: usize,
    hash_builder: S,
) -> BagOfWords<S>
where
    D: AsRef<str>,
    S: BuildHasher,
{
    let mut table = HashTable::with_capacity_and_hasher(capacity, hash_builder);
    for (index, document) in documents.iter().enumerate() {
        add_document(&mut table, index, document.as_ref());
    }
    debug!(
        "indexed {} documents: {} words in {} buckets",
        documents.len(),
        table.len(),
        table.bucket_count()
    );
    table
}

/// Writes `table` as a brace-delimited listing, one ` "word": [i, j],` line
/// per word. Words are listed bucket by bucket, head first within a bucket.
pub fn write_bag_of_words<W, S>(out: &mut W, table: &BagOfWords<S>) -> fmt::Result
where
    W: fmt::Write,
{
    writeln!(out, "{{")?;
    for index in 0..table.bucket_count() {
        let Ok(bucket) = table.bucket(index) else {
            continue;
        };
        for entry in bucket {
            write!(out, " \"{}\": [", entry.key)?;
            for (position, document) in entry.value.iter().enumerate() {
                if position > 0 {
                    write!(out, ", ")?;
                }
                write!(out, "{document}")?;
            }
            writeln!(out, "],")?;
        }
    }
    writeln!(out, "}}")
}
