use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Resolves a drag displacement in screen coordinates (y grows downward).
    ///
    /// The horizontal axis wins only when it strictly dominates, so a
    /// diagonal of equal magnitude resolves vertically.
    pub fn from_displacement(dx: f32, dy: f32) -> Direction {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

/// Uniformly picks a direction not contained in `exclude`.
pub fn pick_random(rng: &mut fastrand::Rng, exclude: &[Direction]) -> GameResult<Direction> {
    let candidates: Vec<Direction> = Direction::iter().filter(|d| !exclude.contains(d)).collect();

    if candidates.is_empty() {
        return Err(GameError::NoDirectionAvailable(exclude.len()));
    }

    Ok(candidates[rng.usize(..candidates.len())])
}

/// A completed drag, start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    pub dx: f32,
    pub dy: f32,
}

impl SwipeGesture {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self {
            dx: end.0 - start.0,
            dy: end.1 - start.1,
        }
    }

    pub fn distance(&self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// `None` when the drag is too short to count as a swipe.
    pub fn resolve(&self, min_distance: f32) -> Option<Direction> {
        if self.distance() < min_distance {
            return None;
        }
        Some(Direction::from_displacement(self.dx, self.dy))
    }
}
