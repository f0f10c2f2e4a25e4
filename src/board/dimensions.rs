//! Board coordinates and dimensions.

/// The coordinates of a single cell in the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coordinate {
    /// Horizontal position of the cell.
    pub x: usize,
    /// Vertical position of the cell.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

/// Rectangular dimensions of the board. Both sides of a match play on boards of
/// the same dimensions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    /// Width of the board. This corresponds to the `x` [`Coordinate`].
    width: usize,
    /// Height of the board. This corresponds to the `y` [`Coordinate`].
    height: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::MAX` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("Dimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "Dimensions too large: {} * {} > {}",
                        width,
                        height,
                        usize::MAX
                    );
                }
            }
        }
    }

    /// Create new [`Dimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::MAX` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`Dimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`Dimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Compute the linear total size of these [`Dimensions`].
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Check whether the given [`Coordinate`] is in bounds.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to a linear index within this dimension.
    /// Returns `None` if the coordinate is out of bounds.
    pub fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// Convert a linear index back into a [`Coordinate`]. Panics if
    /// `idx >= total_size`.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        assert!(idx < self.total_size(), "index {} out of bounds", idx);
        Coordinate {
            x: idx % self.width,
            y: idx / self.width,
        }
    }

    /// Apply a signed offset to a center coordinate. Returns `None` if the
    /// resulting cell is outside the board on either axis.
    pub fn offset(&self, center: Coordinate, (dx, dy): (i32, i32)) -> Option<Coordinate> {
        let x = center.x as i64 + dx as i64;
        let y = center.y as i64 + dy as i64;
        if x < 0 || y < 0 {
            return None;
        }
        let coord = Coordinate::new(x as usize, y as usize);
        if self.contains(coord) {
            Some(coord)
        } else {
            None
        }
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |y| (0..width).map(move |x| Coordinate { x, y }))
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 10x10 board.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}
