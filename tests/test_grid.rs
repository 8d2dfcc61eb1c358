mod common;

use astarviz::{CellState, Grid};
use common::{parse_layout, pos};

#[test]
fn test_new_grid_is_all_free() {
    let grid = Grid::new(50, 800);

    assert_eq!(grid.rows(), 50);
    assert_eq!(grid.cells().len(), 2500);
    assert_eq!(grid.gap(), 16);
    assert_eq!(grid.count(CellState::Free), 2500);
    assert_eq!(grid.cell(pos(3, 7)).map(|c| (c.row, c.col)), Some((3, 7)));
    assert!(grid.cell(pos(50, 0)).is_none());
}

#[test]
fn test_neighbor_order_is_down_up_right_left() {
    let grid = Grid::new(3, 30);

    assert_eq!(
        grid.neighbors_of(pos(1, 1)),
        &[pos(2, 1), pos(0, 1), pos(1, 2), pos(1, 0)]
    );
    assert_eq!(grid.neighbors_of(pos(0, 0)), &[pos(1, 0), pos(0, 1)]);
    assert_eq!(grid.neighbors_of(pos(2, 2)), &[pos(1, 2), pos(2, 1)]);
}

#[test]
fn test_left_neighbor_is_reachable() {
    let grid = Grid::new(4, 40);

    assert!(grid.neighbors_of(pos(0, 3)).contains(&pos(0, 2)));
    assert!(grid.neighbors_of(pos(2, 1)).contains(&pos(2, 0)));
}

#[test]
fn test_obstacles_are_not_neighbors_and_lists_follow_edits() {
    let mut grid = Grid::new(3, 30);

    grid.set_obstacle(pos(1, 0));
    assert_eq!(grid.neighbors_of(pos(1, 1)), &[pos(2, 1), pos(0, 1), pos(1, 2)]);
    assert_eq!(grid.neighbors_of(pos(0, 0)), &[pos(0, 1)]);

    grid.clear_cell(pos(1, 0));
    assert_eq!(
        grid.neighbors_of(pos(1, 1)),
        &[pos(2, 1), pos(0, 1), pos(1, 2), pos(1, 0)]
    );
    assert_eq!(grid.neighbors_of(pos(0, 0)), &[pos(1, 0), pos(0, 1)]);
}

#[test]
fn test_neighbors_are_idempotent() {
    let (grid, _, _) = parse_layout(
        r#"
        .#...
        .#.#.
        ...#.
        ##...
        .....
        "#,
    );

    for cell in grid.cells() {
        let first = grid.neighbors_of(cell.pos()).to_vec();
        let second = grid.neighbors_of(cell.pos()).to_vec();
        assert_eq!(first, second);
    }
}

#[test]
fn test_full_rebuild_matches_incremental_lists() {
    let (mut grid, _, _) = parse_layout(
        r#"
        .#...
        .#.#.
        ...#.
        ##...
        .....
        "#,
    );
    let incremental: Vec<_> = grid.cells().iter().map(|c| grid.neighbors_of(c.pos()).to_vec()).collect();

    grid.update_neighbors();
    let rebuilt: Vec<_> = grid.cells().iter().map(|c| grid.neighbors_of(c.pos()).to_vec()).collect();

    assert_eq!(incremental, rebuilt);
}

#[test]
fn test_search_marks_do_not_change_topology() {
    let mut grid = Grid::new(3, 30);
    let before = grid.neighbors_of(pos(1, 1)).to_vec();

    grid.mark(pos(1, 0), CellState::Visited);
    grid.mark(pos(2, 1), CellState::Frontier);
    grid.mark(pos(0, 1), CellState::Path);

    assert_eq!(grid.neighbors_of(pos(1, 1)), before.as_slice());
}

#[test]
fn test_reset_restores_every_cell() {
    let (mut grid, _, _) = parse_layout(
        r#"
        S#.
        .#.
        ..E
        "#,
    );
    grid.mark(pos(1, 0), CellState::Visited);

    grid.reset();

    assert_eq!(grid.count(CellState::Free), 9);
    assert_eq!(grid.neighbors_of(pos(0, 0)), &[pos(1, 0), pos(0, 1)]);
}

#[test]
fn test_clear_search_marks_keeps_layout() {
    let (mut grid, _, _) = parse_layout(
        r#"
        S#.
        .#.
        ..E
        "#,
    );
    grid.mark(pos(1, 0), CellState::Visited);
    grid.mark(pos(2, 0), CellState::Frontier);
    grid.mark(pos(2, 1), CellState::Path);

    grid.clear_search_marks();

    assert_eq!(grid.state(pos(0, 0)), Some(CellState::Start));
    assert_eq!(grid.state(pos(2, 2)), Some(CellState::End));
    assert_eq!(grid.count(CellState::Obstacle), 2);
    assert_eq!(grid.count(CellState::Free), 5);
}

#[test]
fn test_revision_tracks_changes_only() {
    let mut grid = Grid::new(3, 30);
    let start = grid.revision();

    grid.set_obstacle(pos(1, 1));
    grid.set_obstacle(pos(1, 1));
    assert_eq!(grid.revision(), start + 1);

    grid.set_obstacle(pos(7, 7));
    assert_eq!(grid.revision(), start + 1);
}

#[test]
fn test_pixel_mapping_uses_rows_on_horizontal_axis() {
    let grid = Grid::new(50, 800);

    assert_eq!(grid.cell_at_pixel(17.0, 40.0), Some(pos(1, 2)));
    assert_eq!(grid.cell_at_pixel(0.0, 0.0), Some(pos(0, 0)));
    assert_eq!(grid.cell_at_pixel(799.0, 799.0), Some(pos(49, 49)));
    assert_eq!(grid.cell_at_pixel(800.0, 5.0), None);
    assert_eq!(grid.cell_at_pixel(-1.0, 5.0), None);

    assert_eq!(grid.cell_rect(pos(1, 2)), (16.0, 32.0, 16.0));
}

#[test]
fn test_pixels_past_the_last_full_cell_map_to_nothing() {
    // 100 / 3 leaves a one pixel margin
    let grid = Grid::new(3, 100);

    assert_eq!(grid.gap(), 33);
    assert_eq!(grid.cell_at_pixel(98.0, 10.0), Some(pos(2, 0)));
    assert_eq!(grid.cell_at_pixel(99.0, 10.0), None);
}
