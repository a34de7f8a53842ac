//! Label-keyed random streams for transforms that must replay exactly.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use siphasher::sip::SipHasher13;

/// Seeded random stream for one curation run.
///
/// Seeds normally come from [`seed_from_label`], so the same pack path or
/// `--seed` value shuffles the same way on every platform.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Stream for an explicit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream keyed by a textual label.
    pub fn from_label(label: &str) -> Self {
        Self::from_seed(seed_from_label(label))
    }

    /// Seed the stream started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffles `values` in place, advancing the stream.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

/// Hashes a label to a seed with SipHash-1-3 under zero keys.
///
/// `\` is read as `/`, so a pack path keys the same stream on any host.
pub fn seed_from_label(label: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    for byte in label.bytes() {
        hasher.write_u8(if byte == b'\\' { b'/' } else { byte });
    }
    hasher.finish()
}
