//! Window model
//!
//! Viewport size, scroll position and the scroll requests behaviors issue.
//! The host applies requests (possibly animated) and reports the resulting
//! offsets back through the controller.

use folio_dom::{DOMRect, ScrollOptions};

#[derive(Debug, Clone)]
pub struct Window {
    width: f64,
    height: f64,
    scroll_y: f64,
    scroll_height: f64,
    touch: bool,
    scroll_requests: Vec<ScrollOptions>,
}

impl Window {
    pub fn new(width: f64, height: f64, scroll_height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            scroll_height,
            touch: false,
            scroll_requests: Vec::new(),
        }
    }

    /// Report a touch-capable device
    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn is_touch(&self) -> bool {
        self.touch
    }

    /// Set the scroll offset, clamped to the scrollable range
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.set_scroll_y(self.scroll_y);
    }

    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.scroll_height = scroll_height;
        self.set_scroll_y(self.scroll_y);
    }

    /// Largest reachable offset (never negative)
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.height).max(0.0)
    }

    /// Visible area in document coordinates
    pub fn viewport_rect(&self) -> DOMRect {
        DOMRect::from_xywh(0.0, self.scroll_y, self.width, self.height)
    }

    /// Scrolled percentage, 0 when the page does not overflow
    pub fn scroll_percent(&self) -> f64 {
        let scrollable = self.scroll_height - self.height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
    }

    /// Queue a `scrollTo` for the host
    pub fn request_scroll(&mut self, options: ScrollOptions) {
        tracing::debug!("Scroll requested to {} ({:?})", options.top, options.behavior);
        self.scroll_requests.push(options);
    }

    pub fn take_scroll_requests(&mut self) -> Vec<ScrollOptions> {
        std::mem::take(&mut self.scroll_requests)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 800.0)
    }
}
