//! Seeded train/test splitting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Dataset;

impl Dataset {
    /// Shuffle rows with a seeded RNG and split off the tail as the
    /// evaluation set.
    ///
    /// `test_ratio` is the evaluation fraction (0.2 gives the standard
    /// 80/20 split). With at least two rows, both sides are guaranteed
    /// non-empty. The same seed always produces the same split.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> (Dataset, Dataset) {
        let n = self.len();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let mut n_test = (n as f64 * test_ratio).round() as usize;
        if n >= 2 {
            n_test = n_test.clamp(1, n - 1);
        } else {
            n_test = n_test.min(n);
        }
        let n_train = n - n_test;

        let collect = |idx: &[usize]| -> Dataset {
            Dataset::from_rows(
                idx.iter().map(|&i| self.features()[i].clone()).collect(),
                idx.iter().map(|&i| self.labels()[i]).collect(),
            )
        };

        (collect(&indices[..n_train]), collect(&indices[n_train..]))
    }
}
