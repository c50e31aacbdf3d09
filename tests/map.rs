use glam::Vec2;
use gridfire::map::*;
use gridfire::GameError;
use proptest::prelude::*;

#[test]
fn default_level_parses_as_24x24() {
    let map = OccupancyMap::from_rows(&DEFAULT_LEVEL).unwrap();
    assert_eq!(map.width(), 24);
    assert_eq!(map.height(), 24);
    assert_eq!(map, OccupancyMap::default_level());
}

#[test]
fn default_level_is_closed() {
    let map = OccupancyMap::default_level();
    for i in 0..24 {
        assert!(map.is_blocking(0, i));
        assert!(map.is_blocking(23, i));
        assert!(map.is_blocking(i, 0));
        assert!(map.is_blocking(i, 23));
    }
}

#[test]
fn glyphs() {
    let map = OccupancyMap::from_rows(&["#1", ". ", "00"]).unwrap();
    assert_eq!(map.cell(0, 0), Cell::Blocking);
    assert_eq!(map.cell(0, 1), Cell::Blocking);
    assert_eq!(map.cell(1, 0), Cell::Open);
    assert_eq!(map.cell(1, 1), Cell::Open);
    assert_eq!(map.cell(2, 1), Cell::Open);
}

#[test]
fn ragged_rows_are_rejected() {
    let err = OccupancyMap::from_rows(&["###", "#.", "###"]).unwrap_err();
    assert!(matches!(err, GameError::MapShape { row: 1, expected: 3, found: 2 }));
}

#[test]
fn unknown_glyph_is_rejected_with_its_position() {
    let err = OccupancyMap::from_rows(&["###", "#x#"]).unwrap_err();
    assert!(matches!(err, GameError::MapGlyph { row: 1, col: 1, glyph: 'x' }));
    assert!(err.to_string().contains('x'));
}

#[test]
fn empty_level_is_rejected() {
    let rows: [&str; 0] = [];
    assert!(matches!(OccupancyMap::from_rows(&rows), Err(GameError::EmptyMap)));
    assert!(matches!(OccupancyMap::from_rows(&[""]), Err(GameError::EmptyMap)));
}

#[test]
fn world_positions_floor_into_cells() {
    let map = OccupancyMap::from_rows(&["#.", ".."]).unwrap();
    assert!(map.is_blocking_at(Vec2::new(0.99, 0.99)));
    assert!(!map.is_blocking_at(Vec2::new(1.0, 0.5)));
    assert!(map.is_blocking_at(Vec2::new(-0.01, 1.5)));
    assert!(map.is_blocking_at(Vec2::new(f32::NAN, 1.5)));
}

#[test]
fn blocking_cells_lists_row_col_pairs() {
    let map = OccupancyMap::from_rows(&["#..", "..#"]).unwrap();
    let cells: Vec<_> = map.blocking_cells().collect();
    assert_eq!(cells, vec![(0, 0), (1, 2)]);
}

#[test]
fn walled_room_has_an_open_interior() {
    let map = OccupancyMap::walled(5, 4);
    assert!(map.is_blocking(0, 2));
    assert!(map.is_blocking(3, 2));
    assert!(!map.is_blocking(1, 1));
    assert!(!map.is_blocking(2, 3));
    assert!(map.is_blocking(2, 4));
}

proptest! {
    #[test]
    fn out_of_bounds_is_always_blocking(row in -1000i32..1000, col in -1000i32..1000) {
        let map = OccupancyMap::open(8, 6);
        let inside = (0..6).contains(&row) && (0..8).contains(&col);
        prop_assert_eq!(map.is_blocking(row, col), !inside);
    }
}
