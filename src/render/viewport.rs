//! Mapping from capture-frame pixels to terminal cells.

/// Cell-space rectangle, `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl CellRect {
    pub fn width(&self) -> u16 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0
    }
}

/// Scales a `frame_width x frame_height` pixel area onto a
/// `cols x rows` cell area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    cell_w: f32,
    cell_h: f32,
}

impl Viewport {
    pub fn new(frame_width: u32, frame_height: u32, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cell_w: frame_width.max(1) as f32 / cols.max(1) as f32,
            cell_h: frame_height.max(1) as f32 / rows.max(1) as f32,
        }
    }

    /// Cell containing a pixel position, or `None` if it is off screen.
    pub fn cell_of(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cx = (x / self.cell_w).floor();
        let cy = (y / self.cell_h).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.rows as f32 {
            return None;
        }
        Some((cx as u16, cy as u16))
    }

    /// Cells covered by a pixel rectangle, clipped to the viewport.
    ///
    /// Edges are rounded to the nearest cell boundary; a visible rectangle
    /// always covers at least one cell.
    pub fn rect(&self, x: i32, y: i32, width: i32, height: i32) -> Option<CellRect> {
        let (x0, x1) = Self::span(x as f32, x as f32 + width as f32, self.cell_w, self.cols)?;
        let (y0, y1) = Self::span(y as f32, y as f32 + height as f32, self.cell_h, self.rows)?;
        Some(CellRect { x0, y0, x1, y1 })
    }

    fn span(start: f32, end: f32, cell: f32, limit: u16) -> Option<(u16, u16)> {
        let limit = limit as f32;
        if end <= start || end <= 0.0 || start / cell >= limit {
            return None;
        }
        let a = (start / cell).round().clamp(0.0, limit);
        let mut b = (end / cell).round().clamp(0.0, limit);
        if b <= a {
            b = (a + 1.0).min(limit);
        }
        if b <= a {
            return None;
        }
        Some((a as u16, b as u16))
    }
}
