// Core wire types shared across the protocol.
//
// Defines the compass `Direction` used by track headings and the `GridVec`
// integer vector used for tile positions and extents. Both appear directly
// in wire payloads (`startdir` names, tile coordinates) and in the client's
// track geometry, so they live here rather than in the client crate.
//
// The coordinate system is screen-oriented: X grows rightward, Y grows
// downward, so UP is (0, -1).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D integer vector in track units. Used both for tile-grid positions
/// and for axis-aligned extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridVec {
    pub x: i32,
    pub y: i32,
}

impl GridVec {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four compass headings a track segment can face.
///
/// Wire representation is the uppercase name (`"UP"`, `"RIGHT"`, `"DOWN"`,
/// `"LEFT"`), matching the server's `startdir` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The unit vector for this heading.
    pub const fn vector(self) -> GridVec {
        match self {
            Direction::Up => GridVec::new(0, -1),
            Direction::Right => GridVec::new(1, 0),
            Direction::Down => GridVec::new(0, 1),
            Direction::Left => GridVec::new(-1, 0),
        }
    }

    /// Rotate 90° clockwise. `Up.perpendicular() == Right`, and four
    /// applications return to the starting heading.
    pub const fn perpendicular(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// The reverse heading (two clockwise rotations).
    pub const fn opposite(self) -> Direction {
        self.perpendicular().perpendicular()
    }

    /// True for `Right` and `Left` — headings that travel along the X axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
        };
        f.write_str(name)
    }
}

/// The kind of one track tile, as named in the server's tile triples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Straight,
    TurnLeft,
    TurnRight,
    Finish,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_of_up_is_right() {
        assert_eq!(Direction::Up.perpendicular(), Direction::Right);
    }

    #[test]
    fn perpendicular_four_times_is_identity() {
        for dir in [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            assert_eq!(
                dir.perpendicular()
                    .perpendicular()
                    .perpendicular()
                    .perpendicular(),
                dir
            );
        }
    }

    #[test]
    fn vectors_are_unit_length() {
        for dir in [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            let v = dir.vector();
            assert_eq!(v.x.abs() + v.y.abs(), 1);
        }
    }

    #[test]
    fn opposite_negates_vector() {
        for dir in [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            let v = dir.vector();
            let o = dir.opposite().vector();
            assert_eq!(GridVec::new(-v.x, -v.y), o);
        }
    }

    #[test]
    fn direction_wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"UP\"");
        let dir: Direction = serde_json::from_str("\"LEFT\"").unwrap();
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn tile_kind_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&TileKind::TurnLeft).unwrap(),
            "\"turnleft\""
        );
        let kind: TileKind = serde_json::from_str("\"finish\"").unwrap();
        assert_eq!(kind, TileKind::Finish);
    }
}
