//! Uniform random permutations.
use rand::Rng;

/// Shuffle `items` in place with Fisher–Yates.
///
/// For `i` from the last index down to 1, element `i` is swapped with a
/// uniformly chosen index in `0..=i`, so each of the `n!` orderings is
/// equally likely given a uniform source.
pub fn shuffle_in_place<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Return a uniformly permuted copy of `items`.
#[must_use]
pub fn shuffle_sequence<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut result = items.to_vec();
    shuffle_in_place(&mut result, rng);
    result
}
