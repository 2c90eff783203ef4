/// Axis-aligned rectangle in play-area pixels. `y` grows downward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Bounds { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// True only when the overlap has positive area; shared edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

pub trait Object {
    fn bounds(&self) -> Bounds;

    fn get_pos(&self) -> (i32, i32) {
        let bounds = self.bounds();
        (bounds.x, bounds.y)
    }

    fn collides_with<T: Object>(&self, other: &T) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

impl Object for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}
