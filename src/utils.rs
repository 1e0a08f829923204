//! Utility functions for the Hexapawn crate

use std::collections::BTreeSet;

use rand::Rng;

/// Pick an element of an ordered set uniformly at random.
///
/// Iterating a `BTreeSet` is deterministic, so the pick depends only on the
/// RNG state and the set contents.
///
/// # Returns
///
/// `None` if the set is empty.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use hexapawn::utils::choose_uniform;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let items: BTreeSet<u8> = [1, 2, 3].into_iter().collect();
/// let picked = choose_uniform(&mut rng, &items).unwrap();
/// assert!(items.contains(&picked));
///
/// assert_eq!(choose_uniform(&mut rng, &BTreeSet::<u8>::new()), None);
/// ```
pub fn choose_uniform<R, T>(rng: &mut R, items: &BTreeSet<T>) -> Option<T>
where
    R: Rng + ?Sized,
    T: Copy,
{
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    items.iter().nth(index).copied()
}

/// Fraction `count / total`, or `0.0` when `total` is zero.
pub fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
