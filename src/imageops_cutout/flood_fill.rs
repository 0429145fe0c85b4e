use std::collections::VecDeque;

use crate::imageops_cutout::mask::Mask;

/// Keeps only the candidates reachable from the image border.
///
/// Multi-source breadth-first fill seeded by every candidate on the first and
/// last row and column, spreading through 4-connected candidates. A pocket
/// of candidates enclosed by non-candidates is never reached, so
/// background-colored regions inside the subject survive.
///
/// The result is a subset of `candidates`, and filling it again returns it
/// unchanged.
///
/// # Examples
///
/// ```
/// use imageops_cutout::{flood_fill_from_border, Mask};
///
/// // A ring of non-candidates around a single candidate pixel
/// let candidates = Mask::from_fn(5, 5, |x, y| {
///     let inner = (1..=3).contains(&x) && (1..=3).contains(&y);
///     !inner || (x, y) == (2, 2)
/// });
/// let reached = flood_fill_from_border(&candidates);
/// assert!(reached.get(0, 0));
/// assert!(!reached.get(2, 2));
/// ```
pub fn flood_fill_from_border(candidates: &Mask) -> Mask {
    let (width, height) = candidates.dimensions();
    let mut visited = Mask::filled(width, height, false);
    if width == 0 || height == 0 {
        return visited;
    }

    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let mut seed = |x: u32, y: u32, visited: &mut Mask| {
        if candidates.get(x, y) && !visited.get(x, y) {
            visited.set(x, y, true);
            queue.push_back((x, y));
        }
    };

    for x in 0..width {
        seed(x, 0, &mut visited);
        seed(x, height - 1, &mut visited);
    }
    for y in 0..height {
        seed(0, y, &mut visited);
        seed(width - 1, y, &mut visited);
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (y > 0).then(|| (x, y - 1)),
            (y + 1 < height).then(|| (x, y + 1)),
            (x > 0).then(|| (x - 1, y)),
            (x + 1 < width).then(|| (x + 1, y)),
        ];

        for (nx, ny) in neighbours.into_iter().flatten() {
            if candidates.get(nx, ny) && !visited.get(nx, ny) {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    visited
}
