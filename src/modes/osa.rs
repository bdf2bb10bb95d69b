//! OSA ordering of the Zernike `(n, l)` pairs
//!
//! The OSA index of a pair is `j = (n(n+2) + l) / 2`.
//! Walking `n = 0, 1, 2, ...` and, for each `n`, `l = -n, -n+2, ..., n`
//! visits `j = 0, 1, 2, ...` without gap, so the pairs matching a set of indices
//! are found by walking [OsaPairs] until `j` passes the largest index.

use super::{Result, ZernikeError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Zernike radial degree `n` and azimuthal frequency `l`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZernikePair {
    n: u32,
    l: i32,
}
impl ZernikePair {
    /// Creates a new pair, checking that `|l| <= n` and that `n - |l|` is even
    pub fn new(n: u32, l: i32) -> Result<Self> {
        let m = l.unsigned_abs();
        if m > n || (n - m) % 2 != 0 {
            Err(ZernikeError::InvalidPair { n, l })
        } else {
            Ok(Self { n, l })
        }
    }
    /// Returns the pair of OSA index `j`
    pub fn from_osa(j: usize) -> Self {
        // n is the largest integer with n(n+1)/2 <= j
        let mut n = (((8 * j + 1) as f64).sqrt() as usize).saturating_sub(1) / 2;
        while (n + 1) * (n + 2) / 2 <= j {
            n += 1;
        }
        while n * (n + 1) / 2 > j {
            n -= 1;
        }
        let l = 2 * j as i64 - (n * (n + 2)) as i64;
        Self {
            n: n as u32,
            l: l as i32,
        }
    }
    /// Radial degree
    pub fn n(&self) -> u32 {
        self.n
    }
    /// Azimuthal frequency
    pub fn l(&self) -> i32 {
        self.l
    }
    /// Absolute azimuthal frequency
    pub fn m(&self) -> u32 {
        self.l.unsigned_abs()
    }
    /// OSA index
    pub fn osa_index(&self) -> usize {
        let n = self.n as i64;
        ((n * (n + 2) + self.l as i64) / 2) as usize
    }
}
impl fmt::Display for ZernikePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(n={}, l={})", self.n, self.l)
    }
}

/// Endless iterator over the Zernike pairs in ascending OSA index
#[derive(Debug, Clone, Copy, Default)]
pub struct OsaPairs {
    n: u32,
    l: i32,
}
impl Iterator for OsaPairs {
    type Item = ZernikePair;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = ZernikePair {
            n: self.n,
            l: self.l,
        };
        if self.l >= self.n as i32 {
            self.n += 1;
            self.l = -(self.n as i32);
        } else {
            self.l += 2;
        }
        Some(pair)
    }
}

/// Returns the pairs of the OSA indices in `selection`, in ascending OSA index
///
/// Repeated indices are matched once.
pub fn enumerate_pairs(selection: &[usize]) -> Result<Vec<ZernikePair>> {
    let Some(&target_max) = selection.iter().max() else {
        return Err(ZernikeError::NoPairs(selection.to_vec()));
    };
    let targets: BTreeSet<usize> = selection.iter().copied().collect();
    let pairs: Vec<_> = OsaPairs::default()
        .take_while(|pair| pair.osa_index() <= target_max)
        .filter(|pair| targets.contains(&pair.osa_index()))
        .collect();
    debug!(
        "modes {:?}: {}",
        selection,
        pairs
            .iter()
            .map(|pair| pair.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if pairs.is_empty() {
        Err(ZernikeError::NoPairs(selection.to_vec()))
    } else {
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn first_pairs() {
        let pairs: Vec<(u32, i32)> = OsaPairs::default()
            .take(10)
            .map(|p| (p.n(), p.l()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (0, 0),
                (1, -1),
                (1, 1),
                (2, -2),
                (2, 0),
                (2, 2),
                (3, -3),
                (3, -1),
                (3, 1),
                (3, 3)
            ]
        );
    }

    #[test]
    fn consecutive_indices() {
        OsaPairs::default()
            .take(500)
            .enumerate()
            .for_each(|(j, pair)| assert_eq!(pair.osa_index(), j));
    }

    #[test]
    fn osa_bijection() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let j = rng.gen_range(0..20_000usize);
            let pair = ZernikePair::from_osa(j);
            assert_eq!(pair.osa_index(), j);
            assert!(ZernikePair::new(pair.n(), pair.l()).is_ok());
            assert_eq!(enumerate_pairs(&[j]).unwrap(), vec![pair]);
        }
    }

    #[test]
    fn pair_validation() {
        assert!(ZernikePair::new(2, 0).is_ok());
        assert!(ZernikePair::new(3, -3).is_ok());
        assert!(matches!(
            ZernikePair::new(2, 1),
            Err(ZernikeError::InvalidPair { n: 2, l: 1 })
        ));
        assert!(ZernikePair::new(1, 3).is_err());
    }

    #[test]
    fn defocus_pair() {
        let pair = ZernikePair::from_osa(4);
        assert_eq!((pair.n(), pair.l(), pair.m()), (2, 0, 0));
        assert_eq!(pair.to_string(), "(n=2, l=0)");
    }

    #[test]
    fn selected_pairs() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let pairs = enumerate_pairs(&[1, 3, 7])?;
        let indices: Vec<_> = pairs.iter().map(|p| p.osa_index()).collect();
        assert_eq!(indices, vec![1, 3, 7]);
        let pairs = enumerate_pairs(&[2, 2, 5])?;
        assert_eq!(pairs.len(), 2);
        Ok(())
    }

    #[test]
    fn termination() {
        let j = 1_000_000;
        let walked = OsaPairs::default()
            .take_while(|pair| pair.osa_index() <= j)
            .last()
            .unwrap();
        assert_eq!(walked.osa_index(), j);
        // n grows like sqrt(2j)
        assert!(walked.n() <= 1415);
    }

    #[test]
    fn empty_selection() {
        assert!(matches!(enumerate_pairs(&[]), Err(ZernikeError::NoPairs(_))));
    }
}
