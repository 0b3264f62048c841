/// Integer lattice coordinate: `i` is the row, `j` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vertex {
    pub i: usize,
    pub j: usize,
}

impl Vertex {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn distance(self, rhs: Self) -> f32 {
        let di = self.i as f32 - rhs.i as f32;
        let dj = self.j as f32 - rhs.j as f32;
        (di * di + dj * dj).sqrt()
    }
}

/// Axis-aligned unit step on the lattice, with rows increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// `(di, dj)` row/column step for one move in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// 90 degree turn to the left relative to travel direction:
    /// `(di, dj) -> (dj, -di)`.
    pub fn turn_left(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }

    /// 90 degree turn to the right relative to travel direction:
    /// `(di, dj) -> (-dj, di)`.
    pub fn turn_right(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }
}

/// One straight run of boundary between two lattice vertices.
///
/// The tracer only emits axis-aligned segments with distinct endpoints;
/// corner simplification may later merge two orthogonal runs into a single
/// diagonal segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub a: Vertex,
    pub b: Vertex,
}

impl Segment {
    pub fn new(a: Vertex, b: Vertex) -> Self {
        Self { a, b }
    }

    pub fn length(self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Segments discovered by one contiguous trace operation.
///
/// Across branch points the sequence is not guaranteed end-to-end
/// contiguous; a polyline may hold a tree-like union of runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub segments: Vec<Segment>,
}

impl Polyline {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.segments.iter().map(|s| s.length()).sum()
    }
}
