//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step one cell in `direction` (unwrapped)
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// Apply toroidal wrapping for given world dimensions.
    ///
    /// Correct for arbitrarily large or negative components.
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }

    pub fn is_within(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction for movement.
///
/// Seven compass directions; south-west is not reachable by any opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    South,
    SouthEast,
    East,
    NorthEast,
    North,
    NorthWest,
    West,
}

impl Direction {
    pub const COUNT: usize = 7;

    /// Screen coordinates: +y points south.
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Move table, indexed by opcode value
    pub fn all() -> [Direction; Direction::COUNT] {
        [
            Direction::South,
            Direction::SouthEast,
            Direction::East,
            Direction::NorthEast,
            Direction::North,
            Direction::NorthWest,
            Direction::West,
        ]
    }
}

/// Discriminant of an entity variant, used for counts and per-kind groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organism,
    Obstacle,
    Hazard,
    Resource,
}

impl EntityKind {
    pub const COUNT: usize = 4;

    pub fn all() -> [EntityKind; EntityKind::COUNT] {
        [
            EntityKind::Organism,
            EntityKind::Obstacle,
            EntityKind::Hazard,
            EntityKind::Resource,
        ]
    }

    /// Dense index for per-kind tables
    pub fn index(&self) -> usize {
        match self {
            EntityKind::Organism => 0,
            EntityKind::Obstacle => 1,
            EntityKind::Hazard => 2,
            EntityKind::Resource => 3,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            EntityKind::Organism => Color::BLUE,
            EntityKind::Obstacle => Color::GRAY,
            EntityKind::Hazard => Color::RED,
            EntityKind::Resource => Color::GREEN,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Organism => "organism",
            EntityKind::Obstacle => "obstacle",
            EntityKind::Hazard => "hazard",
            EntityKind::Resource => "resource",
        };
        f.write_str(name)
    }
}

/// Visual tag handed to renderers; opaque to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10, 10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10, 10), Position::new(9, 9));

        let pos = Position::new(10, 10);
        assert_eq!(pos.wrap(10, 10), Position::new(0, 0));
    }

    #[test]
    fn test_wrap_far_out_of_bounds() {
        assert_eq!(Position::new(-41, 63).wrap(20, 20), Position::new(19, 3));
        assert_eq!(Position::new(0, 0).add(-1, -1).wrap(20, 20), Position::new(19, 19));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
    }

    #[test]
    fn test_move_table_has_no_identity() {
        for direction in Direction::all() {
            assert_ne!(direction.to_delta(), (0, 0));
        }
    }

    #[test]
    fn test_kind_indices_are_dense() {
        for (i, kind) in EntityKind::all().iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    proptest! {
        #[test]
        fn wrap_always_in_bounds(
            x in -1_000_000i32..1_000_000,
            y in -1_000_000i32..1_000_000,
            width in 1i32..500,
            height in 1i32..500,
        ) {
            let wrapped = Position::new(x, y).wrap(width, height);
            prop_assert!(wrapped.is_within(width, height));
            prop_assert_eq!((wrapped.x - x).rem_euclid(width), 0);
            prop_assert_eq!((wrapped.y - y).rem_euclid(height), 0);
        }
    }
}
