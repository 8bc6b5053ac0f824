use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Share of rows used for fitting when nothing else is configured.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Index splitting `len` rows into a `ratio` prefix and the remainder (truncating).
pub fn split_index(len: usize, ratio: f64) -> usize {
    let idx = (len as f64 * ratio.clamp(0.0, 1.0)).floor() as usize;
    idx.min(len)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Split<Y> {
    pub train_x: Vec<f64>,
    pub train_y: Vec<Y>,
    pub test_x: Vec<f64>,
    pub test_y: Vec<Y>,
}

impl<Y> Split<Y> {
    pub fn train_len(&self) -> usize {
        self.train_x.len()
    }

    pub fn test_len(&self) -> usize {
        self.test_x.len()
    }
}

/// Ordered split: the first `train_ratio` share of rows trains, the suffix is held out.
pub fn chronological_split<Y: Clone>(x: &[f64], y: &[Y], train_ratio: f64) -> Split<Y> {
    let len = x.len().min(y.len());
    let idx = split_index(len, train_ratio);
    Split {
        train_x: x[..idx].to_vec(),
        train_y: y[..idx].to_vec(),
        test_x: x[idx..len].to_vec(),
        test_y: y[idx..len].to_vec(),
    }
}

/// Seeded shuffled split. The test part holds `ceil(len * test_ratio)` rows.
pub fn shuffled_split<Y: Clone>(x: &[f64], y: &[Y], test_ratio: f64, seed: u64) -> Split<Y> {
    let len = x.len().min(y.len());
    let n_test = ((len as f64 * test_ratio.clamp(0.0, 1.0)).ceil() as usize).min(len);

    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    Split {
        train_x: train_idx.iter().map(|&i| x[i]).collect(),
        train_y: train_idx.iter().map(|&i| y[i].clone()).collect(),
        test_x: test_idx.iter().map(|&i| x[i]).collect(),
        test_y: test_idx.iter().map(|&i| y[i].clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_index_truncates() {
        assert_eq!(split_index(9, 0.8), 7);
        assert_eq!(split_index(10, 0.8), 8);
        assert_eq!(split_index(1, 0.8), 0);
        assert_eq!(split_index(0, 0.8), 0);
        assert_eq!(split_index(5, 1.5), 5);
    }

    #[test]
    fn test_chronological_split_keeps_order() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10, 20, 30, 40, 50];
        let split = chronological_split(&x, &y, 0.8);
        assert_eq!(split.train_x, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(split.train_y, vec![10, 20, 30, 40]);
        assert_eq!(split.test_x, vec![5.0]);
        assert_eq!(split.test_y, vec![50]);
    }

    #[test]
    fn test_shuffled_split_is_seeded_and_aligned() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y: Vec<u32> = (0..20).collect();

        let a = shuffled_split(&x, &y, 0.2, 42);
        let b = shuffled_split(&x, &y, 0.2, 42);
        assert_eq!(a, b);
        assert_eq!(a.test_len(), 4);
        assert_eq!(a.train_len(), 16);

        for (xv, yv) in a.train_x.iter().zip(&a.train_y) {
            assert_eq!(*xv as u32, *yv);
        }

        let mut all: Vec<u32> = a.train_y.iter().chain(&a.test_y).copied().collect();
        all.sort_unstable();
        assert_eq!(all, y);
    }
}
