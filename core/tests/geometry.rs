use duopuzzle_core::geometry::{nine_slice, CELL_GAP};
use duopuzzle_core::{compute_grid_layout, FrameInsets, SlicePart};

fn basic_frame() -> FrameInsets {
    FrameInsets {
        top: 25.0,
        bottom: 23.0,
        left: 25.0,
        right: 27.0,
    }
}

#[test]
fn zero_container_is_hidden() {
    for (width, height) in [(0.0, 0.0), (0.0, 300.0), (300.0, 0.0), (-10.0, 50.0)] {
        let layout = compute_grid_layout(width, height, 3, 3, None);
        assert!(!layout.visible);
        assert_eq!(layout.opacity(), 0.0);
        assert_eq!(layout.cell_size, 0.0);
        assert_eq!(layout.grid_width, 0.0);
        assert!(layout.frame_regions().is_empty());
        assert_eq!(layout.cell_at(1.0, 1.0), None);
    }
}

#[test]
fn empty_grid_is_hidden() {
    assert!(!compute_grid_layout(500.0, 500.0, 0, 3, None).visible);
    assert!(!compute_grid_layout(500.0, 500.0, 3, 0, None).visible);
    assert!(!compute_grid_layout(f32::INFINITY, 500.0, 3, 3, None).visible);
}

#[test]
fn cell_size_uses_tighter_axis() {
    let layout = compute_grid_layout(300.0, 200.0, 2, 3, None);
    assert!(layout.visible);
    let by_width = (300.0 - 2.0 * CELL_GAP) / 3.0;
    assert!((layout.cell_size - by_width).abs() < 1e-4);
    assert!((layout.grid_width - 300.0).abs() < 1e-3);
    assert!(layout.grid_height <= 200.0);

    let tall = compute_grid_layout(1000.0, 101.0, 2, 2, None);
    assert!((tall.cell_size - 50.0).abs() < 1e-4);
    assert!((tall.grid_height - 101.0).abs() < 1e-4);
}

#[test]
fn frame_padding_shrinks_the_grid() {
    let layout = compute_grid_layout(300.0, 300.0, 3, 3, Some(basic_frame()));
    assert!((layout.cell_size - 82.0).abs() < 1e-4);
    let (outer_w, outer_h) = layout.outer_size();
    assert!((outer_w - 300.0).abs() < 1e-3);
    assert!(outer_h <= 300.0);
}

#[test]
fn frame_larger_than_container_hides() {
    let frame = FrameInsets {
        top: 60.0,
        bottom: 60.0,
        left: 10.0,
        right: 10.0,
    };
    assert!(!compute_grid_layout(200.0, 100.0, 2, 2, Some(frame)).visible);
}

#[test]
fn hit_testing_skips_gaps_and_frame() {
    let layout = compute_grid_layout(300.0, 300.0, 3, 3, Some(basic_frame()));
    assert_eq!(layout.cell_origin(4), Some((108.0, 108.0)));
    assert_eq!(layout.cell_at(109.0, 109.0), Some(4));
    assert_eq!(layout.cell_at(26.0, 26.0), Some(0));
    assert_eq!(layout.cell_at(107.5, 30.0), None);
    assert_eq!(layout.cell_at(10.0, 10.0), None);
    assert_eq!(layout.cell_at(299.0, 299.0), None);
    assert_eq!(layout.cell_origin(9), None);
}

#[test]
fn frame_corners_keep_their_size() {
    let regions = nine_slice(300.0, 200.0, basic_frame());
    assert_eq!(regions.len(), 8);
    for region in &regions {
        match region.part {
            SlicePart::TopLeft | SlicePart::TopRight | SlicePart::BottomLeft | SlicePart::BottomRight => {
                assert!(!region.stretch_x && !region.stretch_y);
            }
            SlicePart::Top | SlicePart::Bottom => {
                assert!(region.stretch_x && !region.stretch_y);
                assert_eq!(region.width, 248.0);
            }
            SlicePart::Left | SlicePart::Right => {
                assert!(!region.stretch_x && region.stretch_y);
                assert_eq!(region.height, 152.0);
            }
        }
    }
    let bottom_right = regions
        .iter()
        .find(|region| region.part == SlicePart::BottomRight)
        .copied()
        .expect("bottom right corner");
    assert_eq!((bottom_right.x, bottom_right.y), (273.0, 177.0));
    assert_eq!((bottom_right.width, bottom_right.height), (27.0, 23.0));
}
