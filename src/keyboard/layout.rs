//! Key records and grid layout generation.

/// 60% keyboard, row-major. Non-printable keys use lowercase key names.
const DEFAULT_ROWS: &[&[&str]] = &[
    &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "backspace"],
    &["tab", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\"],
    &["caps", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "enter"],
    &["shift", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "shift"],
    &["space"],
];

/// The default key table as owned rows.
pub fn default_rows() -> Vec<Vec<String>> {
    DEFAULT_ROWS
        .iter()
        .map(|row| row.iter().map(|t| t.to_string()).collect())
        .collect()
}

/// A single key on the virtual keyboard.
///
/// Coordinates are in capture-frame pixels, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Key token, also used as the key's identity (e.g. "a", "enter")
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Key {
    /// Whether a point lies strictly inside this key's rectangle.
    ///
    /// Points on the edge are outside.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        x < px && px < x + self.width as f32 && y < py && py < y + self.height as f32
    }

    /// Label as displayed on the key face.
    pub fn display_label(&self) -> String {
        self.label.to_uppercase()
    }
}

/// Key size and spacing used when generating a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyGeometry {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
    /// Token that gets a wider key
    pub wide_token: String,
    /// Width multiplier for `wide_token`
    pub wide_factor: i32,
}

impl Default for KeyGeometry {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            margin: 20,
            wide_token: "space".to_string(),
            wide_factor: 4,
        }
    }
}

/// Generate key rectangles from a grid of tokens.
///
/// Row `r`, column `c` is placed at
/// `(c * (width + margin) + margin, r * (height + margin) + margin)`.
/// Keys are returned in layout order (row-major). Overlaps are not checked;
/// only the wide key can cause them, and only if it is not last in its row.
/// Coordinates saturate at `i32::MAX` instead of overflowing.
pub fn build_layout<R, T>(rows: &[R], geometry: &KeyGeometry) -> Vec<Key>
where
    R: AsRef<[T]>,
    T: AsRef<str>,
{
    let pitch_x = geometry.width.saturating_add(geometry.margin);
    let pitch_y = geometry.height.saturating_add(geometry.margin);
    let offset = |index: usize, pitch: i32| {
        i32::try_from(index)
            .unwrap_or(i32::MAX)
            .saturating_mul(pitch)
            .saturating_add(geometry.margin)
    };

    let mut keys = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, token) in row.as_ref().iter().enumerate() {
            let token = token.as_ref();
            let width = if token == geometry.wide_token {
                geometry.width.saturating_mul(geometry.wide_factor)
            } else {
                geometry.width
            };
            keys.push(Key {
                label: token.to_string(),
                x: offset(col_idx, pitch_x),
                y: offset(row_idx, pitch_y),
                width,
                height: geometry.height,
            });
        }
    }
    keys
}

/// Axis-aligned bounding box of a set of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Immutable keyboard: the generated key list.
#[derive(Debug, Clone)]
pub struct Keyboard {
    keys: Vec<Key>,
}

impl Keyboard {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Build the keyboard from rows of tokens.
    pub fn from_rows<R, T>(rows: &[R], geometry: &KeyGeometry) -> Self
    where
        R: AsRef<[T]>,
        T: AsRef<str>,
    {
        Self::new(build_layout(rows, geometry))
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Bounding box of all keys, or `None` for an empty keyboard.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.keys.first()?;
        let init = Bounds {
            left: first.x,
            top: first.y,
            right: first.x.saturating_add(first.width),
            bottom: first.y.saturating_add(first.height),
        };
        Some(self.keys.iter().fold(init, |b, k| Bounds {
            left: b.left.min(k.x),
            top: b.top.min(k.y),
            right: b.right.max(k.x.saturating_add(k.width)),
            bottom: b.bottom.max(k.y.saturating_add(k.height)),
        }))
    }

    /// Whether every key fits inside a frame of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.bounds().map_or(true, |b| {
            b.left >= 0
                && b.top >= 0
                && i64::from(b.right) <= i64::from(width)
                && i64::from(b.bottom) <= i64::from(height)
        })
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::from_rows(&default_rows(), &KeyGeometry::default())
    }
}
