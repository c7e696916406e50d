//! Character cell grid with per-cell colors.

use std::fmt::Write as _;

use super::Rgb;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

/// Row-major grid of cells the size of the terminal.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Replace the character and foreground, keeping the background.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Rgb) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = Some(fg);
        }
    }

    /// Fill `[x0, x1) x [y0, y1)` with blank cells of color `bg`.
    pub fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, bg: Rgb) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set(
                    x,
                    y,
                    Cell {
                        ch: ' ',
                        fg: None,
                        bg: Some(bg),
                    },
                );
            }
        }
    }

    /// Write text starting at `(x, y)`, clipped at the right edge.
    pub fn put_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, fg);
        }
    }

    /// Characters of one row, without colors.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Full-screen ANSI rendering with 24-bit colors.
    ///
    /// Each row starts with an absolute cursor move; color escapes are only
    /// emitted when the color changes.
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 4);
        out.push_str("\x1b[?25l");

        for y in 0..self.height {
            let _ = write!(out, "\x1b[{};1H", y + 1);
            let mut fg: Option<Rgb> = None;
            let mut bg: Option<Rgb> = None;
            out.push_str("\x1b[0m");

            let start = y as usize * self.width as usize;
            for cell in &self.cells[start..start + self.width as usize] {
                if cell.fg != fg || cell.bg != bg {
                    if (fg.is_some() && cell.fg.is_none()) || (bg.is_some() && cell.bg.is_none()) {
                        out.push_str("\x1b[0m");
                        fg = None;
                        bg = None;
                    }
                    if cell.fg != fg {
                        if let Some(Rgb(r, g, b)) = cell.fg {
                            let _ = write!(out, "\x1b[38;2;{};{};{}m", r, g, b);
                        }
                    }
                    if cell.bg != bg {
                        if let Some(Rgb(r, g, b)) = cell.bg {
                            let _ = write!(out, "\x1b[48;2;{};{};{}m", r, g, b);
                        }
                    }
                    fg = cell.fg;
                    bg = cell.bg;
                }
                out.push(cell.ch);
            }
        }

        out.push_str("\x1b[0m");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(4, 2);
        assert_eq!(canvas.row_text(0), "    ");
        assert_eq!(canvas.row_text(1), "    ");
        assert_eq!(canvas.row_text(2), "");
    }

    #[test]
    fn test_out_of_bounds_writes_ignored() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_char(5, 5, 'x', Rgb(1, 2, 3));
        canvas.fill_rect(1, 1, 10, 10, Rgb(9, 9, 9));
        assert_eq!(canvas.get(1, 1).unwrap().bg, Some(Rgb(9, 9, 9)));
        assert!(canvas.get(2, 0).is_none());
    }

    #[test]
    fn test_put_text_clips() {
        let mut canvas = Canvas::new(5, 1);
        canvas.put_text(2, 0, "HELLO", Rgb(255, 255, 255));
        assert_eq!(canvas.row_text(0), "  HEL");
    }

    #[test]
    fn test_put_char_keeps_background() {
        let mut canvas = Canvas::new(3, 1);
        canvas.fill_rect(0, 0, 3, 1, Rgb(0, 50, 100));
        canvas.put_char(1, 0, 'A', Rgb(255, 255, 255));
        let cell = canvas.get(1, 0).unwrap();
        assert_eq!(cell.ch, 'A');
        assert_eq!(cell.bg, Some(Rgb(0, 50, 100)));
        assert_eq!(cell.fg, Some(Rgb(255, 255, 255)));
    }

    #[test]
    fn test_to_ansi_emits_colors_once_per_run() {
        let mut canvas = Canvas::new(3, 1);
        canvas.fill_rect(0, 0, 3, 1, Rgb(1, 2, 3));
        let ansi = canvas.to_ansi();
        assert_eq!(ansi.matches("\x1b[48;2;1;2;3m").count(), 1);
        assert!(ansi.contains("\x1b[1;1H"));
        assert!(ansi.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_to_ansi_resets_when_color_ends() {
        let mut canvas = Canvas::new(3, 1);
        canvas.fill_rect(0, 0, 1, 1, Rgb(1, 2, 3));
        let ansi = canvas.to_ansi();
        let after_bg = ansi.split("\x1b[48;2;1;2;3m").nth(1).unwrap();
        assert!(after_bg.starts_with(" \x1b[0m  "));
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_char(0, 0, 'x', Rgb(0, 0, 0));
        canvas.resize(3, 1);
        assert_eq!(canvas.row_text(0), "   ");
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 1);
    }
}
