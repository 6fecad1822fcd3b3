//! Mouse state for picking operations

/// Pointer position and viewport size
#[derive(Debug, Clone, PartialEq)]
pub struct MouseState {
    /// Screen-space X position (pixels from left)
    pub screen_x: f64,
    /// Screen-space Y position (pixels from top)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Left button pressed this frame
    pub left_click: bool,
}

impl MouseState {
    /// Create a mouse state for a viewport
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width: window_width.max(1),
            window_height: window_height.max(1),
            left_click: false,
        }
    }

    /// Viewport aspect ratio
    pub fn aspect(&self) -> f32 {
        (f64::from(self.window_width) / f64::from(self.window_height)) as f32
    }

    /// Convert the pointer position to NDC
    ///
    /// x: -1 = left, +1 = right. y: +1 = top, -1 = bottom.
    #[allow(clippy::cast_possible_truncation)]
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        let ndc_x = (self.screen_x / f64::from(self.window_width)) * 2.0 - 1.0;
        let ndc_y = 1.0 - (self.screen_y / f64::from(self.window_height)) * 2.0;
        (ndc_x as f32, ndc_y as f32)
    }

    /// Convert NDC back to pixel coordinates
    pub fn ndc_to_screen(&self, ndc_x: f32, ndc_y: f32) -> (f64, f64) {
        let x = (f64::from(ndc_x) + 1.0) * 0.5 * f64::from(self.window_width);
        let y = (1.0 - f64::from(ndc_y)) * 0.5 * f64::from(self.window_height);
        (x, y)
    }

    /// Update pointer position
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update window size (for NDC conversion)
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
    }

    /// Set left button state
    pub fn set_left_click(&mut self, clicked: bool) {
        self.left_click = clicked;
    }

    /// Clear click state (call at end of frame)
    pub fn clear_clicks(&mut self) {
        self.left_click = false;
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc_center() {
        let mut mouse = MouseState::new(1920, 1080);
        mouse.update_position(960.0, 540.0);
        let (ndc_x, ndc_y) = mouse.screen_to_ndc();
        assert!(ndc_x.abs() < 0.001);
        assert!(ndc_y.abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ndc_corners() {
        let mut mouse = MouseState::new(1920, 1080);
        mouse.update_position(0.0, 0.0);
        let (ndc_x, ndc_y) = mouse.screen_to_ndc();
        assert!((ndc_x + 1.0).abs() < 0.001); // Left edge
        assert!((ndc_y - 1.0).abs() < 0.001); // Top edge
    }

    #[test]
    fn test_ndc_screen_inverse() {
        let mut mouse = MouseState::new(800, 600);
        let (x, y) = mouse.ndc_to_screen(0.25, -0.5);
        mouse.update_position(x, y);
        let (ndc_x, ndc_y) = mouse.screen_to_ndc();
        assert!((ndc_x - 0.25).abs() < 1e-5);
        assert!((ndc_y + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_window_size_is_guarded() {
        let mouse = MouseState::new(0, 0);
        assert_eq!(mouse.aspect(), 1.0);
    }
}
