use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ExtrudeError::invalid("x")
            .to_string()
            .contains("invalid parameters:")
    );
    assert!(
        ExtrudeError::out_of_bounds("x")
            .to_string()
            .contains("out of bounds:")
    );
    assert!(ExtrudeError::config("x").to_string().contains("config error:"));
}

#[test]
fn grid_mismatch_names_the_axis() {
    let err = ExtrudeError::GridMismatch {
        axis: Axis::Horizontal,
        image_size: 17,
        tile_size: 16,
        margin: 0,
        spacing: 0,
    };
    let msg = err.to_string();
    assert!(msg.contains("cols"));
    assert!(msg.contains("image width 17"));
    assert!(msg.contains("double check your margin"));
    assert!(err.is_grid_mismatch());

    let err = ExtrudeError::GridMismatch {
        axis: Axis::Vertical,
        image_size: 9,
        tile_size: 4,
        margin: 1,
        spacing: 2,
    };
    assert!(err.to_string().contains("rows"));
    assert!(err.to_string().contains("image height 9"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ExtrudeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_grid_mismatch());
}
