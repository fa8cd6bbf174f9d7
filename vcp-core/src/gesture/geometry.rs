#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in page coordinates, like a DOM bounding rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// True when `point` is inside the rect but within `border` of any edge.
    pub fn in_border(&self, point: Point, border: f32) -> bool {
        if !self.contains(point) {
            return false;
        }
        point.x < self.left + border
            || point.x > self.right() - border
            || point.y < self.top + border
            || point.y > self.bottom() - border
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_band() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert!(rect.in_border(Point::new(105.0, 150.0), 10.0));
        assert!(rect.in_border(Point::new(200.0, 195.0), 10.0));
        assert!(!rect.in_border(Point::new(200.0, 150.0), 10.0));
        assert!(!rect.in_border(Point::new(50.0, 150.0), 10.0));
    }
}
