// Grid store and text seeding tests

use liquid_matrix::{
    Error,
    Grid,
    Particle,
    ParticleFlags,
    font,
};

fn rows(grid: &Grid) -> Vec<String> {
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| if grid.get(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(40, 6).unwrap();
    assert_eq!(grid.width(), 40);
    assert_eq!(grid.height(), 6);
    assert_eq!(grid.occupied_count(), 0);
    assert!(grid.all_stagnant(), "An empty grid has nothing left to move");
}

#[test]
fn test_zero_dimensions_rejected() {
    assert_eq!(Grid::new(0, 6).err(), Some(Error::InvalidDimensions));
    assert_eq!(Grid::new(6, 0).err(), Some(Error::InvalidDimensions));
}

#[test]
fn test_huge_grid_reports_out_of_memory() {
    assert_eq!(Grid::new(usize::MAX, 2).err(), Some(Error::OutOfMemory));
}

#[test]
fn test_set_and_read_back() {
    let mut grid = Grid::new(8, 4).unwrap();
    let particle = Particle {
        vx: 1.5,
        vy: -0.25,
        flags: ParticleFlags::STAGNANT,
    };
    grid.set(3, 2, true, particle);

    assert!(grid.get(3, 2));
    assert_eq!(grid.particle(3, 2), Some(&particle));
    assert_eq!(grid.particle(2, 3), None);
    assert_eq!(grid.index(3, 2), Some(2 * 8 + 3));

    grid.set(3, 2, false, particle);
    assert!(!grid.get(3, 2));
    assert_eq!(grid.particle(3, 2), None);
}

#[test]
fn test_out_of_range_writes_are_ignored() {
    let mut grid = Grid::new(8, 4).unwrap();
    for (x, y) in [(-1, 0), (8, 0), (0, -1), (0, 4), (i32::MAX, i32::MIN)] {
        grid.set(x, y, true, Particle::RESTING);
        assert!(!grid.get(x, y));
        assert!(!grid.in_bounds(x, y));
        assert_eq!(grid.index(x, y), None);
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_fill_region_clamps_rows() {
    let mut grid = Grid::new(5, 4).unwrap();
    grid.fill_region(2, 100);
    assert_eq!(grid.occupied_count(), 10);
    assert!(grid.get(0, 2) && grid.get(4, 3));
    assert!(!grid.get(0, 1));

    grid.clear();
    grid.fill_region(-5, 1);
    assert_eq!(grid.occupied_count(), 5);

    grid.clear();
    grid.fill_region(3, 1);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_seed_text_draws_glyphs() {
    let mut grid = Grid::new(16, 7).unwrap();
    grid.seed_text("LI", font::SEED_PITCH);
    assert_eq!(
        rows(&grid),
        [
            "................",
            "#........###....",
            "#.........#.....",
            "#.........#.....",
            "#.........#.....",
            "#####....###....",
            "................",
        ]
    );
}

#[test]
fn test_seed_text_is_case_insensitive_and_deterministic() {
    let mut upper = Grid::new(40, 6).unwrap();
    let mut lower = Grid::new(40, 6).unwrap();
    upper.seed_text("HELLO", font::SEED_PITCH);
    lower.seed_text("hello", font::SEED_PITCH);
    assert_eq!(rows(&upper), rows(&lower));

    let mut again = Grid::new(40, 6).unwrap();
    again.seed_text("HELLO", font::SEED_PITCH);
    assert_eq!(rows(&upper), rows(&again));
}

#[test]
fn test_seed_text_replaces_previous_contents() {
    let mut grid = Grid::new(40, 6).unwrap();
    grid.fill_region(0, 6);
    grid.seed_text("~ ", font::SEED_PITCH);
    assert_eq!(grid.occupied_count(), 0, "Unsupported characters are blank");
}

#[test]
fn test_seed_text_clips_at_right_edge() {
    let mut grid = Grid::new(10, 6).unwrap();
    grid.seed_text("HH", font::SEED_PITCH);
    // The second H starts at column 8; only its two left columns fit.
    let second: usize = (0..6).filter(|&y| grid.get(8, y)).count()
        + (0..6).filter(|&y| grid.get(9, y)).count();
    assert_eq!(second, 5 + 1);
}

#[test]
fn test_seed_text_stops_past_right_edge() {
    let mut huge = Grid::new(40, 6).unwrap();
    huge.seed_text("ABC", usize::MAX);
    let mut single = Grid::new(40, 6).unwrap();
    single.seed_text("A", font::SEED_PITCH);
    assert_eq!(rows(&huge), rows(&single), "Only the first glyph fits");

    let mut wide = Grid::new(40, 6).unwrap();
    wide.seed_text("AB", 40);
    assert_eq!(rows(&wide), rows(&single));
}

#[test]
fn test_occupied_cells_row_major() {
    let mut grid = Grid::new(4, 3).unwrap();
    grid.set(2, 0, true, Particle::RESTING);
    grid.set(0, 2, true, Particle::RESTING);
    grid.set(1, 1, true, Particle::RESTING);
    let cells: Vec<_> = grid.occupied_cells().collect();
    assert_eq!(cells, [(2, 0), (1, 1), (0, 2)]);
}
