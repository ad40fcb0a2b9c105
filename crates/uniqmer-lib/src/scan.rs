//! Uniqueness scan and coordinate emission
//!
//! Second full pass over the sequence, run against the frozen [`KmerIndex`].
//! Every start offset `i` yields two candidates in a fixed order: the
//! forward-strand k-mer at coordinate `i`, then the reverse-complement k-mer
//! at coordinate `-i`. A candidate whose count is exactly 1 is unique; unique
//! candidates whose content is strictly ACGT are written to the sink as
//! `"{coordinate}\t{kmer}"` lines.
//!
//! No sink means a stats-only run: uniqueness is still tallied, nothing is
//! written.

use crate::encoding::is_unambiguous;
use crate::index::KmerIndex;
use std::io::Write;
use thiserror::Error;

/// Error type for the scan pass
#[derive(Error, Debug)]
pub enum ScanError {
    /// Writing or flushing the output sink failed; fatal for the run
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Counters accumulated over one scan pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Candidates whose index count was exactly 1, including ambiguous ones
    pub unique_kmers: u64,
    /// Output lines actually written (unique and ACGT-pure, sink present)
    pub lines_written: u64,
}

/// Scan every offset of `forward` and its reverse complement for unique
/// k-mers, writing qualifying coordinate lines to `sink`
///
/// Candidates are generated in offset-ascending order, forward strand before
/// reverse within an offset. Non-negative coordinates are forward-strand
/// offsets; reverse-strand offsets are emitted negated. At offset 0 the
/// negated coordinate is still 0, so the first reverse-strand candidate is
/// indistinguishable from the forward one in the output encoding.
///
/// # Errors
/// Any sink write or flush failure aborts the scan with [`ScanError::Io`].
pub fn scan_unique<W: Write>(
    forward: &[u8],
    reverse_complement: &[u8],
    index: &KmerIndex,
    mut sink: Option<&mut W>,
) -> Result<ScanStatistics, ScanError> {
    debug_assert_eq!(forward.len(), reverse_complement.len());
    let k = index.k();
    let mut stats = ScanStatistics::default();
    if k == 0 || forward.len() < k {
        return Ok(stats);
    }
    for i in 0..=(forward.len() - k) {
        let coordinate = i as i64;
        emit(coordinate, &forward[i..i + k], index, &mut sink, &mut stats)?;
        emit(
            -coordinate,
            &reverse_complement[i..i + k],
            index,
            &mut sink,
            &mut stats,
        )?;
    }
    if let Some(writer) = sink.as_mut() {
        writer.flush()?;
    }
    Ok(stats)
}

fn emit<W: Write>(
    coordinate: i64,
    kmer: &[u8],
    index: &KmerIndex,
    sink: &mut Option<&mut W>,
    stats: &mut ScanStatistics,
) -> Result<(), ScanError> {
    if !index.is_unique(kmer) {
        return Ok(());
    }
    stats.unique_kmers += 1;
    if let Some(writer) = sink.as_mut() {
        if is_unambiguous(kmer) {
            write!(writer, "{coordinate}\t")?;
            writer.write_all(kmer)?;
            writer.write_all(b"\n")?;
            stats.lines_written += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::reverse_complement;
    use crate::index::KmerIndexBuilder;
    use std::collections::HashMap;

    fn run(seq: &[u8], k: usize) -> (ScanStatistics, Vec<u8>) {
        let rc = reverse_complement(seq).unwrap();
        let mut builder = KmerIndexBuilder::new(k);
        builder.ingest(seq, &rc);
        let index = builder.finish();
        let mut out = Vec::new();
        let stats = scan_unique(seq, &rc, &index, Some(&mut out)).unwrap();
        (stats, out)
    }

    #[test]
    fn test_coordinate_signs_and_order() {
        // revcomp("AAACGT") = "ACGTTT". Forward 3-mers AAA and AAC and
        // reverse 3-mers GTT and TTT occur at one locus each; ACG and CGT
        // occur at two.
        let (stats, out) = run(b"AAACGT", 3);
        assert_eq!(stats.unique_kmers, 4);
        assert_eq!(stats.lines_written, 4);
        assert_eq!(out, b"0\tAAA\n1\tAAC\n-2\tGTT\n-3\tTTT\n");
    }

    #[test]
    fn test_palindromic_sequence_coordinates() {
        // "ATGCAT" equals its own reverse complement, so every window is
        // self-complementary and counts once; all eight candidates are
        // unique. The reverse candidate at offset 2 carries revcomp(S)[2..5].
        let (stats, out) = run(b"ATGCAT", 3);
        assert_eq!(stats.unique_kmers, 8);
        let lines: Vec<&[u8]> = out.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(lines[4], b"2\tGCA");
        assert_eq!(lines[5], b"-2\tGCA");
        // Offset 0 from the reverse strand collapses onto coordinate 0.
        assert_eq!(lines[0], b"0\tATG");
        assert_eq!(lines[1], b"0\tATG");
    }

    #[test]
    fn test_ambiguous_unique_kmer_is_counted_but_not_written() {
        // revcomp("ANG") = "CNT"; both windows are unique but impure.
        let (stats, out) = run(b"ANG", 3);
        assert_eq!(stats.unique_kmers, 2);
        assert_eq!(stats.lines_written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_sink_still_counts_unique() {
        let seq = b"AAACGT";
        let rc = reverse_complement(seq).unwrap();
        let mut builder = KmerIndexBuilder::new(3);
        builder.ingest(seq, &rc);
        let index = builder.finish();
        let stats = scan_unique(seq, &rc, &index, None::<&mut Vec<u8>>).unwrap();
        assert_eq!(stats.unique_kmers, 4);
        assert_eq!(stats.lines_written, 0);
    }

    #[test]
    fn test_k_longer_than_sequence_emits_nothing() {
        let (stats, out) = run(b"ACG", 7);
        assert_eq!(stats, ScanStatistics::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_uniqueness_agrees_with_brute_force() {
        // Deterministic pseudo-random sequence with a sprinkling of N.
        let mut state: u64 = 0x5DEECE66D;
        let mut seq = Vec::with_capacity(300);
        for i in 0..300 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if i % 37 == 36 {
                seq.push(b'N');
            } else {
                seq.push(b"ACGT"[(state >> 33) as usize % 4]);
            }
        }
        let k = 4;
        let rc = reverse_complement(&seq).unwrap();

        // Brute-force per-locus counts, computing each reverse window from
        // the mirrored forward slice instead of the precomputed strand.
        let mut brute: HashMap<Vec<u8>, u64> = HashMap::new();
        let num_offsets = seq.len() - k + 1;
        for i in 0..num_offsets {
            let fwd = seq[i..i + k].to_vec();
            let mirrored = &seq[seq.len() - k - i..seq.len() - i];
            let rev = reverse_complement(mirrored).unwrap();
            *brute.entry(fwd.clone()).or_insert(0) += 1;
            if rev != fwd {
                *brute.entry(rev).or_insert(0) += 1;
            }
        }

        let (stats, out) = run(&seq, k);

        let mut expected_unique = 0u64;
        for i in 0..num_offsets {
            for window in [&seq[i..i + k], &rc[i..i + k]] {
                if brute[&window.to_vec()] == 1 {
                    expected_unique += 1;
                }
            }
        }
        assert_eq!(stats.unique_kmers, expected_unique);

        // Every emitted line names a k-mer with brute-force count 1.
        for line in out.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
            let tab = line.iter().position(|&b| b == b'\t').unwrap();
            let kmer = &line[tab + 1..];
            assert_eq!(brute[&kmer.to_vec()], 1, "non-unique k-mer emitted");
            assert!(is_unambiguous(kmer));
        }
    }
}
