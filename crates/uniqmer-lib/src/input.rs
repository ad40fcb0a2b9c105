//! Sequence input loading and normalization
//!
//! Two input shapes are supported: a raw text file holding one nucleotide
//! sequence (ASCII whitespace is dropped), or a single-record FASTA file
//! parsed with needletail. Either way the sequence is normalized to
//! uppercase before counting so that k-mer identity is case-independent.
//!
//! Alphabet validation does not happen here; an invalid symbol surfaces
//! later as [`crate::EncodingError::InvalidBase`] during reverse
//! complementation, before any counting result is produced.

use anyhow::{bail, Context, Result};
use needletail::parse_fastx_file;
use std::fs;
use std::path::Path;

/// Load one nucleotide sequence from `path`, normalized to uppercase
///
/// Files starting with `>` are parsed as FASTA and must contain exactly one
/// record: coordinates are only meaningful relative to a single sequence.
/// Any other file is taken as raw sequence text.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid FASTA when it
/// claims to be, or holds more than one record.
pub fn load_sequence<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    if data.first() == Some(&b'>') {
        load_fasta(path)
    } else {
        Ok(normalize(&data))
    }
}

fn load_fasta(path: &Path) -> Result<Vec<u8>> {
    let mut reader = parse_fastx_file(path)
        .with_context(|| format!("failed to open FASTA file: {}", path.display()))?;
    let sequence = {
        let record = match reader.next() {
            Some(record) => record
                .with_context(|| format!("failed to parse FASTA record in {}", path.display()))?,
            None => bail!("no sequence record in {}", path.display()),
        };
        normalize(&record.seq())
    };
    if reader.next().is_some() {
        bail!(
            "{} holds more than one record; coordinates are only meaningful for a single sequence",
            path.display()
        );
    }
    Ok(sequence)
}

/// Uppercase the sequence and drop ASCII whitespace
fn normalize(data: &[u8]) -> Vec<u8> {
    data.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| b.to_ascii_uppercase())
        .collect()
}
