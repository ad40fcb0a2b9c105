//! Nucleotide complement table and reverse complement
//!
//! The run alphabet is {A, C, G, T, N} in both case families. Complementation
//! maps A<->T and C<->G, passes N through, and preserves the case family of
//! its input. Any other byte is an invalid symbol and aborts the run: a
//! malformed input invalidates the whole counting pass, so there is no
//! partial recovery.
//!
//! Callers are expected to normalize sequences to uppercase before counting
//! so that k-mer identity is case-independent (see [`crate::input`]).

use thiserror::Error;

/// Error type for complement operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The input byte is not a recognized nucleotide (A/C/G/T/N, either case)
    #[error("Invalid base: {0:?}")]
    InvalidBase(u8),
}

/// Complement a single nucleotide, preserving its case family
///
/// A <-> T, C <-> G, N -> N; lowercase input yields lowercase output.
///
/// # Errors
/// Returns [`EncodingError::InvalidBase`] for any byte outside the alphabet.
#[inline]
pub const fn complement(base: u8) -> Result<u8, EncodingError> {
    match base {
        b'A' => Ok(b'T'),
        b'T' => Ok(b'A'),
        b'G' => Ok(b'C'),
        b'C' => Ok(b'G'),
        b'N' => Ok(b'N'),
        b'a' => Ok(b't'),
        b't' => Ok(b'a'),
        b'g' => Ok(b'c'),
        b'c' => Ok(b'g'),
        b'n' => Ok(b'n'),
        _ => Err(EncodingError::InvalidBase(base)),
    }
}

/// Reverse complement of a whole sequence
///
/// Output position `L-1-i` holds the complement of input position `i`.
/// Computed once per run; both the counting pass and the scan pass reuse the
/// result instead of recomputing windows per k-mer.
///
/// # Errors
/// Fails with [`EncodingError::InvalidBase`] on the first invalid symbol.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut out = vec![0u8; seq.len()];
    for (i, &base) in seq.iter().enumerate() {
        out[seq.len() - 1 - i] = complement(base)?;
    }
    Ok(out)
}

/// True when every symbol is strictly one of uppercase A, C, G, T
///
/// Output filter for the scan pass: a k-mer containing `N` can still be
/// unique, but it is never written to the sink.
#[inline]
pub fn is_unambiguous(kmer: &[u8]) -> bool {
    kmer.iter().all(|&b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}
