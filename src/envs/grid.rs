//! Grid of intersections
use rand::Rng;
use std::fmt;

/// Intersection coordinates.
///
/// `x` grows to the east and `y` grows to the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Intersection {
    pub x: i32,
    pub y: i32,
}

impl Intersection {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const EAST: Self = Self::new(1, 0);
    pub const NORTH: Self = Self::new(0, -1);
    pub const WEST: Self = Self::new(-1, 0);
    pub const SOUTH: Self = Self::new(0, 1);

    pub const ALL: [Self; 4] = [Self::EAST, Self::NORTH, Self::WEST, Self::SOUTH];

    const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub const fn turn_left(self) -> Self {
        Self::new(self.dy, -self.dx)
    }

    pub const fn turn_right(self) -> Self {
        Self::new(-self.dy, self.dx)
    }

    /// Whether travel is along the north-south axis.
    pub const fn is_vertical(self) -> bool {
        self.dy != 0
    }

    pub const fn dot(self, other: Self) -> i32 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Whether a cab with heading `other` approaches from the right of a cab with this heading.
    pub const fn approaches_from_right(self, other: Self) -> bool {
        self.dy == other.dx && -self.dx == other.dy
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.dx, self.dy) {
            (1, 0) => write!(f, "east"),
            (0, -1) => write!(f, "north"),
            (-1, 0) => write!(f, "west"),
            (0, 1) => write!(f, "south"),
            (dx, dy) => write!(f, "({}, {})", dx, dy),
        }
    }
}

/// Location and heading of a cab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    pub location: Intersection,
    pub heading: Heading,
}

impl Pose {
    pub const fn new(location: Intersection, heading: Heading) -> Self {
        Self { location, heading }
    }
}

/// A rectangular grid of intersections at `1..=width` × `1..=height`.
///
/// Roads wrap around at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of intersections.
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest distance between any two intersections.
    pub const fn diameter(&self) -> u32 {
        self.width.saturating_sub(1) + self.height.saturating_sub(1)
    }

    /// Row-major position of an intersection on the grid.
    pub const fn index(&self, location: Intersection) -> usize {
        (location.y - 1) as usize * self.width as usize + (location.x - 1) as usize
    }

    /// All intersections in row-major order.
    pub fn intersections(&self) -> impl Iterator<Item = Intersection> {
        let width = to_coord(self.width);
        let height = to_coord(self.height);
        (1..=height).flat_map(move |y| (1..=width).map(move |x| Intersection::new(x, y)))
    }

    /// Sample an intersection uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Intersection {
        Intersection::new(
            rng.gen_range(1..=to_coord(self.width)),
            rng.gen_range(1..=to_coord(self.height)),
        )
    }

    /// The intersection reached by driving one block from `location` along `heading`.
    pub fn advance(&self, location: Intersection, heading: Heading) -> Intersection {
        let width = to_coord(self.width);
        let height = to_coord(self.height);
        Intersection::new(
            (location.x + heading.dx - 1).rem_euclid(width) + 1,
            (location.y + heading.dy - 1).rem_euclid(height) + 1,
        )
    }

    /// Manhattan distance between two intersections, ignoring wrap-around.
    pub const fn distance(a: Intersection, b: Intersection) -> u32 {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(8, 6)
    }
}

fn to_coord(size: u32) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}
