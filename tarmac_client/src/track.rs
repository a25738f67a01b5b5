// Track model reconstruction.
//
// A `gamestart` message carries the track in one of two server-chosen
// representations:
// - tiled: an ordered list of `[kind, x, y]` triples. Only the first tile's
//   heading is given (`startdir`); every later tile derives its incoming
//   heading from the previous tile's outgoing heading. `Track::from_message`
//   propagates that heading through the chain and produces concrete oriented
//   tiles with per-kind extents.
// - grid: a flat row-major list of opaque cell codes, reshaped to
//   height × width. No heading propagation.
//
// Tile kinds are a closed enum (`TileKind`); the outgoing-direction and
// extent rules for each kind are dispatched in single `match`es below. A
// finish tile behaves exactly like a straight tile — it only marks the lap
// line.

use serde_json::Value;

use tarmac_protocol::{Direction, GridVec, TileKind, TileSpec, TrackMessage};

use crate::error::ClientError;

/// Length of one straight segment, in length units.
pub const SEGMENT_LENGTH: i32 = 45;

/// Width of the drivable track, perpendicular to travel.
pub const TRACK_WIDTH: i32 = 5 * SEGMENT_LENGTH;

/// Side of the square a turn tile occupies, regardless of heading.
pub const TURN_EXTENT: i32 = 6 * TRACK_WIDTH;

/// Inner tag required on the track message nested in `gamestart`.
const TRACK_TAG: &str = "track";

/// One oriented segment of the reconstructed track. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: GridVec,
    pub dir_in: Direction,
}

impl Tile {
    pub const fn new(kind: TileKind, pos: GridVec, dir_in: Direction) -> Self {
        Self { kind, pos, dir_in }
    }

    /// The heading handed to the next tile in the chain.
    ///
    /// Turning left counter-rotates the heading, turning right rotates it
    /// clockwise; straights and the finish line pass it through.
    pub const fn dir_out(&self) -> Direction {
        match self.kind {
            TileKind::Straight | TileKind::Finish => self.dir_in,
            TileKind::TurnLeft => self.dir_in.perpendicular().opposite(),
            TileKind::TurnRight => self.dir_in.perpendicular(),
        }
    }

    /// Axis-aligned footprint of this tile, in length units.
    ///
    /// A straight segment is `SEGMENT_LENGTH` long along its direction of
    /// travel and `TRACK_WIDTH` wide across it, so its extent axes swap when
    /// the heading turns 90°. Turn tiles always occupy the same fixed
    /// square.
    pub const fn extent(&self) -> GridVec {
        match self.kind {
            TileKind::Straight | TileKind::Finish => {
                if self.dir_in.is_horizontal() {
                    GridVec::new(SEGMENT_LENGTH, TRACK_WIDTH)
                } else {
                    GridVec::new(TRACK_WIDTH, SEGMENT_LENGTH)
                }
            }
            TileKind::TurnLeft | TileKind::TurnRight => GridVec::new(TURN_EXTENT, TURN_EXTENT),
        }
    }
}

/// Row-major grid of opaque cell codes.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    width: u32,
    cells: Vec<Value>,
}

impl CellGrid {
    /// The cell at `(row, col)`. Row-major: `data[x + width * y]` lands at
    /// `(row = y, col = x)`.
    ///
    /// Panics when `row` or `col` is out of range. An oversized `col` must
    /// not wrap into the next row.
    pub fn cell(&self, row: u32, col: u32) -> &Value {
        assert!(
            col < self.width,
            "column {col} out of range for width {}",
            self.width
        );
        &self.cells[(col + self.width * row) as usize]
    }
}

/// Which representation the server sent.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackLayout {
    Tiled(Vec<Tile>),
    Grid(CellGrid),
}

/// The reconstructed track for one game. Built once per `gamestart`,
/// immutable thereafter.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub width: u32,
    pub height: u32,
    pub start_dir: Direction,
    pub layout: TrackLayout,
}

impl Track {
    /// Build the track model from a `track` message.
    pub fn from_message(msg: TrackMessage) -> Result<Self, ClientError> {
        if msg.message != TRACK_TAG {
            return Err(ClientError::Protocol(format!(
                "expected track message, got tag {:?}",
                msg.message
            )));
        }

        let layout = if msg.tiled {
            let specs = msg
                .tiles
                .ok_or_else(|| ClientError::Protocol("tiled track without tiles".into()))?;
            TrackLayout::Tiled(build_chain(msg.startdir, &specs))
        } else {
            let data = msg
                .data
                .ok_or_else(|| ClientError::Protocol("grid track without data".into()))?;
            let expected = (msg.width as usize) * (msg.height as usize);
            if data.len() != expected {
                return Err(ClientError::Protocol(format!(
                    "grid data length {} does not match {}x{}",
                    data.len(),
                    msg.width,
                    msg.height
                )));
            }
            TrackLayout::Grid(CellGrid {
                width: msg.width,
                cells: data,
            })
        };

        Ok(Self {
            width: msg.width,
            height: msg.height,
            start_dir: msg.startdir,
            layout,
        })
    }

    /// The ordered tile chain, if the server sent the tiled representation.
    pub fn tiles(&self) -> Option<&[Tile]> {
        match &self.layout {
            TrackLayout::Tiled(tiles) => Some(tiles),
            TrackLayout::Grid(_) => None,
        }
    }

    /// The cell grid, if the server sent the grid representation.
    pub fn grid(&self) -> Option<&CellGrid> {
        match &self.layout {
            TrackLayout::Tiled(_) => None,
            TrackLayout::Grid(grid) => Some(grid),
        }
    }
}

/// Propagate the heading through the tile chain: each tile's incoming
/// direction is the previous tile's outgoing direction.
fn build_chain(start_dir: Direction, specs: &[TileSpec]) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(specs.len());
    let mut dir_in = start_dir;
    for &TileSpec(kind, x, y) in specs {
        let tile = Tile::new(kind, GridVec::new(x, y), dir_in);
        dir_in = tile.dir_out();
        tiles.push(tile);
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track_message(value: serde_json::Value) -> TrackMessage {
        serde_json::from_value(value).unwrap()
    }

    fn tiled_message(startdir: &str, tiles: serde_json::Value) -> TrackMessage {
        track_message(json!({
            "message": "track",
            "width": 10,
            "height": 10,
            "startdir": startdir,
            "tiled": true,
            "tiles": tiles,
        }))
    }

    #[test]
    fn chain_invariant_holds_through_turns() {
        let msg = tiled_message(
            "RIGHT",
            json!([
                ["straight", 0, 0],
                ["turnright", 1, 0],
                ["straight", 1, 1],
                ["turnleft", 1, 2],
                ["finish", 2, 2],
            ]),
        );
        let track = Track::from_message(msg).unwrap();
        let tiles = track.tiles().unwrap();
        assert_eq!(tiles.len(), 5);
        for pair in tiles.windows(2) {
            assert_eq!(pair[1].dir_in, pair[0].dir_out());
        }
        // RIGHT through a right turn goes DOWN, then a left turn restores RIGHT.
        assert_eq!(tiles[2].dir_in, Direction::Down);
        assert_eq!(tiles[4].dir_in, Direction::Right);
    }

    #[test]
    fn turn_left_counter_rotates_heading() {
        let tile = Tile::new(TileKind::TurnLeft, GridVec::new(0, 0), Direction::Up);
        assert_eq!(tile.dir_out(), Direction::Left);
    }

    #[test]
    fn turn_right_rotates_heading_clockwise() {
        let tile = Tile::new(TileKind::TurnRight, GridVec::new(0, 0), Direction::Up);
        assert_eq!(tile.dir_out(), Direction::Right);
    }

    #[test]
    fn straight_extent_axes_swap_with_heading() {
        let east = Tile::new(TileKind::Straight, GridVec::new(0, 0), Direction::Right);
        assert_eq!(east.extent(), GridVec::new(SEGMENT_LENGTH, TRACK_WIDTH));

        let north = Tile::new(TileKind::Straight, GridVec::new(0, 0), Direction::Up);
        assert_eq!(north.extent(), GridVec::new(TRACK_WIDTH, SEGMENT_LENGTH));
    }

    #[test]
    fn finish_behaves_like_straight() {
        let finish = Tile::new(TileKind::Finish, GridVec::new(3, 1), Direction::Down);
        let straight = Tile::new(TileKind::Straight, GridVec::new(3, 1), Direction::Down);
        assert_eq!(finish.dir_out(), straight.dir_out());
        assert_eq!(finish.extent(), straight.extent());
    }

    #[test]
    fn turn_extent_is_fixed_square_for_every_heading() {
        for dir in [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            for kind in [TileKind::TurnLeft, TileKind::TurnRight] {
                let tile = Tile::new(kind, GridVec::new(0, 0), dir);
                assert_eq!(tile.extent(), GridVec::new(TURN_EXTENT, TURN_EXTENT));
            }
        }
    }

    #[test]
    fn grid_cells_map_row_major() {
        let msg = track_message(json!({
            "message": "track",
            "width": 2,
            "height": 2,
            "startdir": "UP",
            "tiled": false,
            "data": ["a", "b", "c", "d"],
        }));
        let track = Track::from_message(msg).unwrap();
        let grid = track.grid().unwrap();
        assert_eq!(grid.cell(0, 0), &json!("a"));
        assert_eq!(grid.cell(0, 1), &json!("b"));
        assert_eq!(grid.cell(1, 0), &json!("c"));
        assert_eq!(grid.cell(1, 1), &json!("d"));
        assert!(track.tiles().is_none());
    }

    #[test]
    #[should_panic(expected = "column 2 out of range")]
    fn grid_cell_rejects_out_of_range_column() {
        let msg = track_message(json!({
            "message": "track",
            "width": 2,
            "height": 2,
            "startdir": "UP",
            "tiled": false,
            "data": ["a", "b", "c", "d"],
        }));
        let track = Track::from_message(msg).unwrap();
        // Would alias cell (1, 0) if the column were not bounded.
        track.grid().unwrap().cell(0, 2);
    }

    #[test]
    #[should_panic]
    fn grid_cell_rejects_out_of_range_row() {
        let msg = track_message(json!({
            "message": "track",
            "width": 2,
            "height": 1,
            "startdir": "UP",
            "tiled": false,
            "data": ["a", "b"],
        }));
        let track = Track::from_message(msg).unwrap();
        track.grid().unwrap().cell(1, 0);
    }

    #[test]
    fn grid_length_mismatch_is_rejected() {
        let msg = track_message(json!({
            "message": "track",
            "width": 3,
            "height": 2,
            "startdir": "UP",
            "tiled": false,
            "data": [1, 2, 3],
        }));
        assert!(matches!(
            Track::from_message(msg),
            Err(ClientError::Protocol(_))
        ));
    }

    #[test]
    fn wrong_inner_tag_is_rejected() {
        let msg = track_message(json!({
            "message": "trick",
            "width": 1,
            "height": 1,
            "startdir": "UP",
            "tiled": false,
            "data": [0],
        }));
        assert!(matches!(
            Track::from_message(msg),
            Err(ClientError::Protocol(_))
        ));
    }

    #[test]
    fn tiled_without_tiles_is_rejected() {
        let msg = track_message(json!({
            "message": "track",
            "width": 1,
            "height": 1,
            "startdir": "UP",
            "tiled": true,
        }));
        assert!(matches!(
            Track::from_message(msg),
            Err(ClientError::Protocol(_))
        ));
    }
}
