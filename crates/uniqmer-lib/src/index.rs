//! Two-phase k-mer occurrence index
//!
//! Maps k-mer content to the number of distinct genomic loci at which that
//! content is observed, across the forward strand and the reverse complement.
//! Two occurrences are the same index entry iff their symbol content is
//! identical, regardless of strand or offset.
//!
//! Construction is split into a mutable [`KmerIndexBuilder`] and a frozen
//! read-only [`KmerIndex`], so the counting pass must commit every count
//! before the first uniqueness query can be made. The scan pass only ever
//! sees the frozen view.

use ahash::AHashMap;
use tracing::debug;

/// Accumulates per-locus k-mer counts over a sequence and its reverse
/// complement
pub struct KmerIndexBuilder {
    k: usize,
    counts: AHashMap<Box<[u8]>, u64>,
}

impl KmerIndexBuilder {
    /// Create a builder for k-mers of length `k`
    ///
    /// `k >= 1` is the caller's responsibility; configuration validation
    /// happens before the pipeline is invoked.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            counts: AHashMap::new(),
        }
    }

    /// Count every k-mer locus of `forward` and its precomputed reverse
    /// complement
    ///
    /// For each start offset `i` in `[0, L-K]` the forward window is counted,
    /// and the reverse-complement window at the same offset is counted only
    /// when its content differs from the forward window. An identical window
    /// is the same genomic locus seen from the opposite strand; counting it
    /// twice would make a k-mer occurring at a single locus look repeated.
    ///
    /// `K > L` yields no offsets and leaves the index empty; that is not an
    /// error here.
    pub fn ingest(&mut self, forward: &[u8], reverse_complement: &[u8]) {
        debug_assert_eq!(forward.len(), reverse_complement.len());
        if self.k == 0 || forward.len() < self.k {
            return;
        }
        for i in 0..=(forward.len() - self.k) {
            let fwd = &forward[i..i + self.k];
            let rc = &reverse_complement[i..i + self.k];
            self.bump(fwd);
            if rc != fwd {
                self.bump(rc);
            }
        }
    }

    fn bump(&mut self, kmer: &[u8]) {
        if let Some(count) = self.counts.get_mut(kmer) {
            *count += 1;
        } else {
            self.counts.insert(kmer.into(), 1);
        }
    }

    /// Freeze the counts into a read-only index
    ///
    /// After this point no count can change; uniqueness queries are valid.
    pub fn finish(self) -> KmerIndex {
        debug!("froze k-mer index with {} distinct entries", self.counts.len());
        KmerIndex {
            k: self.k,
            counts: self.counts,
        }
    }
}

/// Frozen, read-only view of the per-locus k-mer counts
pub struct KmerIndex {
    k: usize,
    counts: AHashMap<Box<[u8]>, u64>,
}

impl KmerIndex {
    /// The k-mer length this index was built for
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct k-mers observed
    #[inline]
    pub fn num_distinct(&self) -> usize {
        self.counts.len()
    }

    /// Per-locus occurrence count for `kmer`, 0 when never observed
    #[inline]
    pub fn count(&self, kmer: &[u8]) -> u64 {
        self.counts.get(kmer).copied().unwrap_or(0)
    }

    /// True when `kmer` occurs at exactly one genomic locus
    #[inline]
    pub fn is_unique(&self, kmer: &[u8]) -> bool {
        self.count(kmer) == 1
    }

    /// Iterate over every distinct k-mer and its count
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.counts.iter().map(|(kmer, &count)| (kmer.as_ref(), count))
    }
}
