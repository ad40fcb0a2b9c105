// uniqmer: unique k-mer coordinate scanning
//
// Two-pass scanner that counts k-mer occurrences across a genome and its
// reverse complement, then emits the strand-signed coordinates of k-mers
// observed at exactly one locus.

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod encoding;
pub mod index;
pub mod input;
pub mod scan;
pub mod sink;

// Re-export common types at crate root
pub use encoding::{complement, is_unambiguous, reverse_complement, EncodingError};
pub use index::{KmerIndex, KmerIndexBuilder};
pub use scan::{scan_unique, ScanError, ScanStatistics};
pub use sink::CoordinateSink;
