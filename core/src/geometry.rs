pub const CELL_GAP: f32 = 1.0;

/// Decorative frame border widths, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInsets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl FrameInsets {
    pub fn horizontal(&self) -> f32 {
        self.left.max(0.0) + self.right.max(0.0)
    }

    pub fn vertical(&self) -> f32 {
        self.top.max(0.0) + self.bottom.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlicePart {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// One border region of a nine-slice frame, in frame-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceRegion {
    pub part: SlicePart,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub stretch_x: bool,
    pub stretch_y: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub visible: bool,
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub frame: Option<FrameInsets>,
}

impl GridLayout {
    pub fn hidden(rows: usize, cols: usize) -> Self {
        Self {
            visible: false,
            rows,
            cols,
            cell_size: 0.0,
            grid_width: 0.0,
            grid_height: 0.0,
            frame: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    /// Grid plus frame border.
    pub fn outer_size(&self) -> (f32, f32) {
        let insets = self.frame.unwrap_or_default();
        (
            self.grid_width + insets.horizontal(),
            self.grid_height + insets.vertical(),
        )
    }

    /// Top-left of a cell, relative to the outer (framed) box.
    pub fn cell_origin(&self, cell: usize) -> Option<(f32, f32)> {
        if !self.visible || cell >= self.rows.saturating_mul(self.cols) {
            return None;
        }
        let insets = self.frame.unwrap_or_default();
        let row = (cell / self.cols) as f32;
        let col = (cell % self.cols) as f32;
        let step = self.cell_size + CELL_GAP;
        Some((insets.left.max(0.0) + col * step, insets.top.max(0.0) + row * step))
    }

    /// Cell under a point relative to the outer box. Gaps and frame hit nothing.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let insets = self.frame.unwrap_or_default();
        let local_x = x - insets.left.max(0.0);
        let local_y = y - insets.top.max(0.0);
        if local_x < 0.0 || local_y < 0.0 || local_x >= self.grid_width || local_y >= self.grid_height {
            return None;
        }
        let step = self.cell_size + CELL_GAP;
        let col = (local_x / step).floor() as usize;
        let row = (local_y / step).floor() as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        if local_x - col as f32 * step >= self.cell_size || local_y - row as f32 * step >= self.cell_size {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Border regions for drawing the frame image. Corners keep their size;
    /// edges stretch only along their length.
    pub fn frame_regions(&self) -> Vec<SliceRegion> {
        match self.frame {
            Some(insets) if self.visible => {
                let (width, height) = self.outer_size();
                nine_slice(width, height, insets)
            }
            _ => Vec::new(),
        }
    }
}

/// Largest square cell that fits `cols x rows` cells with unit gaps inside the
/// container after the frame border is taken out.
///
/// Zero or non-finite space, or an empty grid, yields a hidden layout.
pub fn compute_grid_layout(
    width: f32,
    height: f32,
    rows: usize,
    cols: usize,
    frame: Option<FrameInsets>,
) -> GridLayout {
    if rows == 0 || cols == 0 || !width.is_finite() || !height.is_finite() {
        return GridLayout::hidden(rows, cols);
    }
    let insets = frame.unwrap_or_default();
    let effective_width = width - insets.horizontal();
    let effective_height = height - insets.vertical();
    if effective_width <= 0.0 || effective_height <= 0.0 {
        return GridLayout::hidden(rows, cols);
    }
    let by_width = (effective_width - (cols - 1) as f32 * CELL_GAP) / cols as f32;
    let by_height = (effective_height - (rows - 1) as f32 * CELL_GAP) / rows as f32;
    let cell_size = by_width.min(by_height);
    if cell_size <= 0.0 {
        return GridLayout::hidden(rows, cols);
    }
    GridLayout {
        visible: true,
        rows,
        cols,
        cell_size,
        grid_width: cols as f32 * cell_size + (cols - 1) as f32 * CELL_GAP,
        grid_height: rows as f32 * cell_size + (rows - 1) as f32 * CELL_GAP,
        frame,
    }
}

pub fn nine_slice(width: f32, height: f32, insets: FrameInsets) -> Vec<SliceRegion> {
    let top = insets.top.max(0.0);
    let bottom = insets.bottom.max(0.0);
    let left = insets.left.max(0.0);
    let right = insets.right.max(0.0);
    let inner_w = (width - left - right).max(0.0);
    let inner_h = (height - top - bottom).max(0.0);
    let right_x = left + inner_w;
    let bottom_y = top + inner_h;
    let region = |part, x, y, width, height, stretch_x, stretch_y| SliceRegion {
        part,
        x,
        y,
        width,
        height,
        stretch_x,
        stretch_y,
    };
    vec![
        region(SlicePart::TopLeft, 0.0, 0.0, left, top, false, false),
        region(SlicePart::Top, left, 0.0, inner_w, top, true, false),
        region(SlicePart::TopRight, right_x, 0.0, right, top, false, false),
        region(SlicePart::Right, right_x, top, right, inner_h, false, true),
        region(SlicePart::BottomRight, right_x, bottom_y, right, bottom, false, false),
        region(SlicePart::Bottom, left, bottom_y, inner_w, bottom, true, false),
        region(SlicePart::BottomLeft, 0.0, bottom_y, left, bottom, false, false),
        region(SlicePart::Left, 0.0, top, left, inner_h, false, true),
    ]
}
