//! Coordinate translation between oracle image space and screen space.

use deskpilot_core_types::Point;

use crate::errors::AgentError;

/// Scales points from the coordinate space of the frame the oracle saw to
/// the live screen. The two differ whenever the frame was downscaled for
/// transport.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    image_width: u32,
    image_height: u32,
    screen_width: u32,
    screen_height: u32,
}

impl CoordinateMapper {
    pub fn new(image_width: u32, image_height: u32, screen_width: u32, screen_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            screen_width,
            screen_height,
        }
    }

    /// Identity mapping for same-size frame and screen.
    pub fn identity(width: u32, height: u32) -> Self {
        Self::new(width, height, width, height)
    }

    /// Map an image-space point to screen space. Points outside the image
    /// area are a typed failure, not a clamp: an out-of-range coordinate
    /// from the oracle is a malformed answer, and silently clamping it
    /// would click somewhere unintended.
    pub fn map(&self, point: Point) -> Result<Point, AgentError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(AgentError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.image_width,
                height: self.image_height,
            });
        }
        if point.x < 0
            || point.y < 0
            || point.x >= self.image_width as i32
            || point.y >= self.image_height as i32
        {
            return Err(AgentError::OutOfBounds {
                x: point.x,
                y: point.y,
                width: self.image_width,
                height: self.image_height,
            });
        }

        let x = point.x as i64 * self.screen_width as i64 / self.image_width as i64;
        let y = point.y as i64 * self.screen_height as i64 / self.image_height as i64;
        Ok(Point::new(x as i32, y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_unchanged() {
        let mapper = CoordinateMapper::identity(1920, 1080);
        assert_eq!(mapper.map(Point::new(100, 200)).unwrap(), Point::new(100, 200));
    }

    #[test]
    fn test_upscales_to_screen() {
        let mapper = CoordinateMapper::new(960, 540, 1920, 1080);
        assert_eq!(mapper.map(Point::new(480, 270)).unwrap(), Point::new(960, 540));
    }

    #[test]
    fn test_out_of_bounds_is_typed_failure() {
        let mapper = CoordinateMapper::identity(100, 100);
        assert!(matches!(
            mapper.map(Point::new(100, 50)),
            Err(AgentError::OutOfBounds { .. })
        ));
        assert!(matches!(
            mapper.map(Point::new(-1, 0)),
            Err(AgentError::OutOfBounds { .. })
        ));
    }
}
