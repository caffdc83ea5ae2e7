use super::*;

#[test]
fn single_tile_grows_by_twice_the_extrusion() {
    let grid = TileGrid::solve(16, 16, &GridSpec::new(16, 16)).unwrap();
    assert_eq!((grid.cols(), grid.rows()), (1, 1));
    assert_eq!(grid.output_size(1).unwrap(), (18, 18));
    assert_eq!(grid.output_size(0).unwrap(), (16, 16));
}

#[test]
fn margin_and_spacing_are_not_inflated() {
    // 2*5 + 3*16 + 2*10 = 78 wide, 2*5 + 2*16 + 1*10 = 52 high.
    let spec = GridSpec::new(16, 16).with_margin(5).with_spacing(10);
    let grid = TileGrid::solve(78, 52, &spec).unwrap();
    assert_eq!((grid.cols(), grid.rows()), (3, 2));
    assert_eq!(grid.tile_count(), 6);

    let e = 2;
    let (w, h) = grid.output_size(e).unwrap();
    assert_eq!(w, 2 * 5 + 2 * 10 + 3 * (16 + 2 * e));
    assert_eq!(h, 2 * 5 + 10 + 2 * (16 + 2 * e));
}

#[test]
fn non_integer_tile_count_is_a_grid_mismatch() {
    let err = TileGrid::solve(17, 16, &GridSpec::new(16, 16)).unwrap_err();
    assert!(matches!(
        err,
        ExtrudeError::GridMismatch {
            axis: Axis::Horizontal,
            image_size: 17,
            tile_size: 16,
            ..
        }
    ));

    let err = TileGrid::solve(16, 20, &GridSpec::new(16, 8)).unwrap_err();
    assert!(matches!(
        err,
        ExtrudeError::GridMismatch {
            axis: Axis::Vertical,
            ..
        }
    ));
}

#[test]
fn margin_wider_than_image_is_a_grid_mismatch() {
    let spec = GridSpec::new(4, 4).with_margin(10);
    assert!(TileGrid::solve(8, 8, &spec).unwrap_err().is_grid_mismatch());
}

#[test]
fn zero_tile_size_is_invalid_parameters() {
    assert!(matches!(
        TileGrid::solve(16, 16, &GridSpec::new(0, 16)),
        Err(ExtrudeError::InvalidParameters(_))
    ));
}

#[test]
fn margin_only_image_has_no_tiles() {
    // width = 2*margin - spacing => zero columns.
    let spec = GridSpec::new(4, 4).with_margin(2).with_spacing(1);
    let grid = TileGrid::solve(3, 3, &spec).unwrap();
    assert_eq!(grid.tile_count(), 0);
    assert_eq!(grid.output_size(3).unwrap(), (3, 3));
    assert_eq!(grid.tiles(3).count(), 0);
}

#[test]
fn tile_placements_follow_the_grid() {
    let spec = GridSpec::new(8, 4).with_margin(1).with_spacing(2);
    // 2*1 + 2*8 + 1*2 = 20 wide, 2*1 + 3*4 + 2*2 = 18 high.
    let grid = TileGrid::solve(20, 18, &spec).unwrap();
    assert_eq!((grid.cols(), grid.rows()), (2, 3));

    let t = grid.tile(2, 1, 3);
    assert_eq!((t.src_x, t.src_y), (1 + (8 + 2), 1 + 2 * (4 + 2)));
    assert_eq!(
        (t.dst_x, t.dst_y),
        (1 + (8 + 2 + 6), 1 + 2 * (4 + 2 + 6))
    );

    let all: Vec<_> = grid.tiles(3).collect();
    assert_eq!(all.len(), 6);
    assert_eq!((all[0].row, all[0].col), (0, 0));
    assert_eq!((all[1].row, all[1].col), (0, 1));
    assert_eq!(all[5], t);
}

#[test]
fn row_bands_are_disjoint_and_inside_output() {
    let spec = GridSpec::new(4, 4).with_margin(1).with_spacing(1);
    let grid = TileGrid::solve(11, 11, &spec).unwrap();
    let e = 2;
    let (_, out_h) = grid.output_size(e).unwrap();

    let mut cursor = 0;
    for row in 0..grid.rows() {
        let (top, height) = grid.row_band(row, e);
        assert!(top >= cursor);
        assert_eq!(height, 4 + 2 * e);
        cursor = top + height;
    }
    assert_eq!(cursor + 1, out_h);
}

#[test]
fn huge_extrusion_overflow_is_rejected() {
    let grid = TileGrid::solve(16, 16, &GridSpec::new(16, 16)).unwrap();
    assert!(matches!(
        grid.output_size(u32::MAX),
        Err(ExtrudeError::InvalidParameters(_))
    ));
}
