use rand::Rng;

/// Relocates the element at `from` to `to`, shifting everything in
/// between by one slot. Indices must already be bounds-checked by the
/// caller; `to` is the element's index in the final arrangement.
pub fn relocate<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// In-place Fisher–Yates shuffle that also follows one position of
/// interest through every swap, returning where that element ended up.
/// Slices of length 0 or 1 are left untouched.
pub fn shuffle_tracking<T, R: Rng + ?Sized>(
    items: &mut [T],
    current: Option<usize>,
    rng: &mut R,
) -> Option<usize> {
    let mut tracked = current;
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
        tracked = match tracked {
            Some(c) if c == i => Some(j),
            Some(c) if c == j => Some(i),
            other => other,
        };
    }
    tracked
}
