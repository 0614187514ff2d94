use nalgebra::Point2;

/// Axis-aligned ellipse used by the radial compositing processors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point2<f32>,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub fn new(center: Point2<f32>, radius_x: f32, radius_y: f32) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    /// Inclusive containment test; a degenerate ellipse contains nothing.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let dx = (x - self.center.x) / self.radius_x;
        let dy = (y - self.center.y) / self.radius_y;
        dx * dx + dy * dy <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_containment() {
        let e = Ellipse::new(Point2::new(5.0, 5.0), 3.0, 3.0);
        assert!(e.contains(5.0, 5.0));
        assert!(e.contains(8.0, 5.0));
        assert!(!e.contains(8.0, 8.0));
    }

    #[test]
    fn zero_radius_is_empty() {
        let e = Ellipse::new(Point2::new(0.0, 0.0), 0.0, 2.0);
        assert!(!e.contains(0.0, 0.0));
    }
}
