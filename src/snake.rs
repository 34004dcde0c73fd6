use std::collections::VecDeque;

use serde::Deserialize;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one unit along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Snake body plus its committed and pending headings.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Buffers a turn for the next tick, ignoring reversals of the current
    /// heading. A later call before the tick replaces an earlier one.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Makes the pending direction the live heading.
    pub fn commit_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// Returns the head position one step along the live heading.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Returns true if moving the head to `position` would hit the body.
    ///
    /// With `tail_vacates` the tail cell is ignored, since it leaves its cell
    /// in the same tick.
    #[must_use]
    pub fn collides_with_body(&self, position: Position, tail_vacates: bool) -> bool {
        let checked = if tail_vacates {
            self.body.len() - 1
        } else {
            self.body.len()
        };

        self.body
            .iter()
            .take(checked)
            .any(|segment| *segment == position)
    }

    /// Moves the head to `next_head`; the tail is kept when `grow` is set.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the live movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction that the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn step_moves_one_unit_along_each_axis() {
        let origin = Position { x: 5, y: 5 };

        assert_eq!(origin.step(Direction::Up), Position { x: 5, y: 4 });
        assert_eq!(origin.step(Direction::Down), Position { x: 5, y: 6 });
        assert_eq!(origin.step(Direction::Left), Position { x: 4, y: 5 });
        assert_eq!(origin.step(Direction::Right), Position { x: 6, y: 5 });
    }

    #[test]
    fn advance_keeps_length_unless_growing() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.advance(snake.next_head_position(), false);
        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);

        snake.advance(snake.next_head_position(), true);
        assert_eq!(snake.len(), 2);
        assert!(snake.segments().copied().eq([
            Position { x: 7, y: 5 },
            Position { x: 6, y: 5 },
        ]));
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        snake.buffer_direction(Direction::Down);
        snake.commit_direction();

        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.next_head_position(), Position { x: 5, y: 4 });
    }

    #[test]
    fn direction_buffer_last_valid_input_wins() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);
        assert_eq!(snake.pending_direction(), Direction::Down);

        // Left reverses the live heading, so Down stays buffered.
        snake.buffer_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn reversal_is_checked_against_live_heading_not_pending() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Down);

        snake.buffer_direction(Direction::Right);
        // Left reverses the pending turn but not the live heading.
        snake.buffer_direction(Direction::Left);

        assert_eq!(snake.pending_direction(), Direction::Left);
    }

    #[test]
    fn body_collision_ignores_vacating_tail() {
        let snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 6, y: 5 },
                Position { x: 6, y: 6 },
                Position { x: 5, y: 6 },
            ],
            Direction::Down,
        );
        let tail = Position { x: 5, y: 6 };

        assert!(!snake.collides_with_body(tail, true));
        assert!(snake.collides_with_body(tail, false));
        assert!(snake.collides_with_body(Position { x: 6, y: 6 }, true));
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn empty_snake_is_rejected() {
        let _ = Snake::from_segments(Vec::new(), Direction::Up);
    }
}
