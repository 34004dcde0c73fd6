use std::collections::HashSet;

use crate::config::GridSize;
use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Upper bound on rejection-sampling draws before falling back to the free-cell list.
pub const MAX_REJECTION_ATTEMPTS: usize = 32;

/// Picks a uniformly random cell that the snake does not occupy.
///
/// While the snake covers at most half the board, random cells are drawn
/// and redrawn on a hit, up to [`MAX_REJECTION_ATTEMPTS`] times. Denser
/// boards, and runs of unlucky draws, sample directly from the free cells.
/// Returns `None` only when the snake fills every cell.
#[must_use]
pub fn spawn_position<R: RandomSource + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let total = bounds.total_cells();
    if total == 0 {
        return None;
    }

    if snake.len().saturating_mul(2) <= total {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let candidate = random_cell(rng, bounds);
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
    }

    sample_free_cell(rng, bounds, snake)
}

fn random_cell<R: RandomSource + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    let x = rng.pick_index(usize::from(bounds.width));
    let y = rng.pick_index(usize::from(bounds.height));

    Position {
        x: x as i32,
        y: y as i32,
    }
}

fn sample_free_cell<R: RandomSource + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let occupied: HashSet<Position> = snake.segments().copied().collect();
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(occupied.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.pick_index(candidates.len());
    Some(candidates[index])
}
