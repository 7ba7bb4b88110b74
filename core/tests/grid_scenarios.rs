use minegrid_core::{
    ConfigError, Coord2, Direction, Grid, GridConfig, GridError, HazardLayout, MarkOutcome,
    RandomHazardGenerator,
};

fn fixed_grid(size: Coord2, hazards: &[Coord2]) -> Grid {
    let layout = HazardLayout::from_hazard_coords(size, hazards).unwrap();
    Grid::from_layout(layout).unwrap()
}

fn move_to(grid: &mut Grid, (x, y): Coord2) {
    let (cx, cy) = grid.selection();
    let horizontal = if x >= cx { Direction::Right } else { Direction::Left };
    let vertical = if y >= cy { Direction::Down } else { Direction::Up };
    for _ in 0..x.abs_diff(cx) {
        grid.move_selection(horizontal);
    }
    for _ in 0..y.abs_diff(cy) {
        grid.move_selection(vertical);
    }
    assert_eq!(grid.selection(), (x, y));
}

#[test]
fn test_selection_clamps_at_edges() {
    let mut grid = Grid::generate(
        GridConfig::new((5, 5)).unwrap(),
        RandomHazardGenerator::new(5),
    )
    .unwrap();
    assert_eq!(grid.selection(), (0, 0));

    for _ in 0..10 {
        grid.move_selection(Direction::Left);
        grid.move_selection(Direction::Up);
    }
    assert_eq!(grid.selection(), (0, 0));

    for _ in 0..10 {
        grid.move_selection(Direction::Right);
    }
    assert_eq!(grid.selection(), (4, 0));

    for _ in 0..10 {
        grid.move_selection(Direction::Down);
    }
    assert_eq!(grid.selection(), (4, 4));
}

#[test]
fn test_selection_moves_do_not_touch_cells() {
    let mut grid = fixed_grid((3, 3), &[(1, 1)]);
    let before: Vec<_> = grid.cells().map(|(pos, cell)| (pos, *cell)).collect();

    grid.move_selection(Direction::Right);
    grid.move_selection(Direction::Down);

    let after: Vec<_> = grid.cells().map(|(pos, cell)| (pos, *cell)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_dig_signals_loss() {
    let mut grid = fixed_grid((1, 2), &[(0, 0)]);

    assert!(grid.dig_selected());

    grid.move_selection(Direction::Down);
    assert_eq!(grid.selection(), (0, 1));
    assert!(!grid.dig_selected());
}

#[test]
fn test_win_requires_exact_flags() {
    let mut grid = fixed_grid((3, 3), &[(1, 1)]);
    assert!(!grid.is_won(), "no flags placed");

    move_to(&mut grid, (1, 1));
    assert_eq!(grid.flag_selected(), MarkOutcome::Changed);
    assert!(grid.is_won());

    move_to(&mut grid, (0, 0));
    grid.flag_selected();
    assert!(!grid.is_won(), "extra flag on a safe cell");

    grid.flag_selected();
    assert!(grid.is_won());
}

#[test]
fn test_revealing_every_safe_cell_is_not_a_win() {
    let mut grid = fixed_grid((3, 1), &[(0, 0)]);

    move_to(&mut grid, (2, 0));
    assert!(!grid.dig_selected());
    move_to(&mut grid, (1, 0));
    assert!(!grid.dig_selected());

    assert_eq!(grid.revealed_count(), 2);
    assert!(!grid.is_won());
}

#[test]
fn test_full_flood_on_hazard_free_grid() {
    let mut grid = fixed_grid((40, 30), &[]);
    move_to(&mut grid, (20, 15));

    assert!(!grid.dig_selected());
    assert_eq!(grid.revealed_count(), 1200);
}

#[test]
fn test_max_size_flood_terminates() {
    let mut grid = fixed_grid((255, 255), &[(254, 254)]);

    assert_eq!(grid.reveal((0, 0)), 255 * 255 - 1);
}

#[test]
fn test_no_flood_without_zero_cells() {
    // hazards on every even column: each safe cell touches one
    let hazards: Vec<Coord2> = (0..6)
        .step_by(2)
        .flat_map(|x| (0..4).map(move |y| (x, y)))
        .collect();
    let mut grid = fixed_grid((6, 4), &hazards);

    for (pos, cell) in grid.cells() {
        if !cell.has_hazard() {
            assert_ne!(cell.adjacent_hazard_count(), 0, "safe cell {:?}", pos);
        }
    }

    assert_eq!(grid.reveal((1, 2)), 1);
    assert_eq!(grid.reveal((5, 0)), 1);
    assert_eq!(grid.revealed_count(), 2);
}

#[test]
fn test_flood_stops_at_numbered_ring() {
    // wall of hazards on column 3 splits the grid
    let hazards: Vec<Coord2> = (0..5).map(|y| (3, y)).collect();
    let mut grid = fixed_grid((7, 5), &hazards);

    grid.reveal((0, 0));

    for (pos, cell) in grid.cells() {
        let expected = pos.0 <= 2;
        assert_eq!(cell.is_revealed(), expected, "cell {:?}", pos);
    }
}

#[test]
fn test_invalid_configuration_reported() {
    assert!(matches!(
        Grid::generate(
            GridConfig::new_unchecked((3, 3), 1.0),
            RandomHazardGenerator::new(0)
        ),
        Err(GridError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_fixed_layout_must_leave_a_free_cell() {
    let every_cell: Vec<Coord2> = (0..4).flat_map(|y| (0..4).map(move |x| (x, y))).collect();
    let layout = HazardLayout::from_hazard_coords((4, 4), &every_cell).unwrap();

    assert_eq!(
        Grid::generate(GridConfig::new((4, 4)).unwrap(), layout.clone()),
        Err(GridError::InvalidConfiguration(ConfigError::TooManyHazards {
            hazards: 16,
            cells: 16
        }))
    );
    assert_eq!(
        Grid::from_layout(layout),
        Err(GridError::InvalidConfiguration(ConfigError::TooManyHazards {
            hazards: 16,
            cells: 16
        }))
    );
}

#[test]
fn test_fixed_layout_must_match_configured_hazard_count() {
    let config = GridConfig::new((4, 4)).unwrap();
    assert_eq!(config.hazard_count(), 1);

    let two = HazardLayout::from_hazard_coords((4, 4), &[(1, 1), (2, 2)]).unwrap();
    assert_eq!(
        Grid::generate(config, two),
        Err(GridError::HazardCountMismatch {
            expected: 1,
            found: 2
        })
    );

    let one = HazardLayout::from_hazard_coords((4, 4), &[(2, 2)]).unwrap();
    let grid = Grid::generate(config, one).unwrap();
    assert_eq!(grid.hazard_count(), config.hazard_count());
}

#[test]
fn test_entropy_grids_follow_density() {
    let grid = Grid::new(20, 10).unwrap();

    assert_eq!(grid.size(), (20, 10));
    assert_eq!(grid.hazard_count(), 20);
    assert_eq!(grid.selection(), (0, 0));
    assert!(grid.cells().all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged()));
}
