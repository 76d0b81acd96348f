//! Grid snapping and clamping for element geometry.
//!
//! All functions here are stateless and total: any input yields a valid
//! position or size, so callers can apply them on every pointer move
//! without a failure path.

use kurbo::{Point, Size};

/// Fixed canvas width in pixels.
pub const CANVAS_WIDTH: f64 = 1140.0;

/// Number of grid columns across the canvas.
pub const GRID_COLUMNS: u32 = 14;

/// Width of one grid column (the quantization unit for x and width).
pub const COLUMN_WIDTH: f64 = CANVAS_WIDTH / GRID_COLUMNS as f64;

/// Minimum element width (one grid column).
pub const MIN_ELEMENT_WIDTH: f64 = COLUMN_WIDTH;

/// Minimum element height in pixels.
pub const MIN_ELEMENT_HEIGHT: f64 = 50.0;

/// Snap an x coordinate to the nearest grid column boundary.
pub fn snap_x(raw_x: f64, column_width: f64) -> f64 {
    (raw_x / column_width).round() * column_width
}

/// Clamp a position so the element stays inside the canvas.
///
/// `x` is bounded to `[0, canvas_width - size.width]` (the lower bound wins
/// if the element is wider than the canvas); `y` is bounded below by 0 and
/// unbounded above, since the canvas grows vertically.
pub fn clamp_position(pos: Point, size: Size, canvas_width: f64) -> Point {
    let max_x = (canvas_width - size.width).max(0.0);
    Point::new(pos.x.clamp(0.0, max_x), pos.y.max(0.0))
}

/// Clamp a size to the grid and the canvas bounds.
///
/// Width is snapped to the grid, bounded below by `min_width` and above by
/// the space remaining right of `pos_x`. Height is bounded below by
/// `min_height` and never grid-snapped.
pub fn clamp_size(
    width: f64,
    height: f64,
    min_width: f64,
    min_height: f64,
    canvas_width: f64,
    pos_x: f64,
) -> Size {
    let max_width = (canvas_width - pos_x).max(min_width);
    let width = snap_x(width, COLUMN_WIDTH).clamp(min_width, max_width);
    Size::new(width, height.max(min_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width() {
        // 1140px / 14 columns ~ 81.43px
        assert!((COLUMN_WIDTH - 81.42857142857143).abs() < 1e-9);
    }

    #[test]
    fn test_snap_x_rounds_to_nearest_column() {
        assert_eq!(snap_x(0.0, COLUMN_WIDTH), 0.0);
        // 100 / 81.43 ~ 1.23 -> column 1
        assert!((snap_x(100.0, COLUMN_WIDTH) - COLUMN_WIDTH).abs() < 1e-9);
        // 130 / 81.43 ~ 1.60 -> column 2
        assert!((snap_x(130.0, COLUMN_WIDTH) - 2.0 * COLUMN_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn test_snap_x_exact_multiple_unchanged() {
        let x = 3.0 * COLUMN_WIDTH;
        assert!((snap_x(x, COLUMN_WIDTH) - x).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_position_left_and_right() {
        let size = Size::new(150.0, 50.0);
        let clamped = clamp_position(Point::new(-30.0, 10.0), size, CANVAS_WIDTH);
        assert_eq!(clamped.x, 0.0);

        let clamped = clamp_position(Point::new(2000.0, 10.0), size, CANVAS_WIDTH);
        assert_eq!(clamped.x, CANVAS_WIDTH - 150.0);
    }

    #[test]
    fn test_clamp_position_y_floor() {
        let size = Size::new(150.0, 50.0);
        let clamped = clamp_position(Point::new(0.0, -40.0), size, CANVAS_WIDTH);
        assert_eq!(clamped.y, 0.0);
        let clamped = clamp_position(Point::new(0.0, 9999.0), size, CANVAS_WIDTH);
        assert_eq!(clamped.y, 9999.0);
    }

    #[test]
    fn test_clamp_size_snaps_width() {
        let size = clamp_size(
            200.0,
            80.0,
            MIN_ELEMENT_WIDTH,
            MIN_ELEMENT_HEIGHT,
            CANVAS_WIDTH,
            0.0,
        );
        // 200 / 81.43 ~ 2.46 -> 2 columns
        assert!((size.width - 2.0 * COLUMN_WIDTH).abs() < 1e-9);
        assert_eq!(size.height, 80.0);
    }

    #[test]
    fn test_clamp_size_minimums() {
        let size = clamp_size(
            5.0,
            5.0,
            MIN_ELEMENT_WIDTH,
            MIN_ELEMENT_HEIGHT,
            CANVAS_WIDTH,
            0.0,
        );
        assert!((size.width - MIN_ELEMENT_WIDTH).abs() < 1e-9);
        assert_eq!(size.height, MIN_ELEMENT_HEIGHT);
    }

    #[test]
    fn test_clamp_size_bounded_by_right_edge() {
        let pos_x = 12.0 * COLUMN_WIDTH;
        let size = clamp_size(
            10.0 * COLUMN_WIDTH,
            60.0,
            MIN_ELEMENT_WIDTH,
            MIN_ELEMENT_HEIGHT,
            CANVAS_WIDTH,
            pos_x,
        );
        assert!((size.width - 2.0 * COLUMN_WIDTH).abs() < 1e-9);
        assert!(pos_x + size.width <= CANVAS_WIDTH + 1e-9);
    }

    #[test]
    fn test_clamp_size_height_not_snapped() {
        let size = clamp_size(
            COLUMN_WIDTH,
            137.0,
            MIN_ELEMENT_WIDTH,
            MIN_ELEMENT_HEIGHT,
            CANVAS_WIDTH,
            0.0,
        );
        assert_eq!(size.height, 137.0);
    }
}
