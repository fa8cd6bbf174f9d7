use super::frame::FrameCoalescer;
use super::geometry::{Point, Rect};
use log::trace;
use vcp_config::GestureConfig;

/// Translate plus uniform scale applied to the floating window, with the
/// transform origin at the window's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    fn of(rect: &Rect, corner: Self) -> Point {
        match corner {
            Self::TopLeft => Point::new(rect.left, rect.top),
            Self::TopRight => Point::new(rect.right(), rect.top),
            Self::BottomLeft => Point::new(rect.left, rect.bottom()),
            Self::BottomRight => Point::new(rect.right(), rect.bottom()),
        }
    }

    fn nearest(rect: &Rect, point: Point) -> Self {
        let center = rect.center();
        match (point.x < center.x, point.y < center.y) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FloatingGesture {
    #[default]
    Idle,
    /// `grab` is the pointer's offset from the window's top-left corner.
    Moving { grab: Point },
    /// `anchor` stays fixed on screen while the `handle` corner follows the
    /// pointer.
    Resizing { handle: Corner, anchor: Point },
}

/// Picture-in-picture window controller.
///
/// A press inside the border band resizes around the opposite corner; any
/// other press inside the window moves it. Pointer moves only queue a
/// transform; the host applies at most one per animation frame through
/// [`FloatingWindow::on_frame`].
#[derive(Debug, Clone)]
pub struct FloatingWindow {
    /// Untransformed layout box.
    layout: Rect,
    transform: Transform,
    gesture: FloatingGesture,
    frames: FrameCoalescer<Transform>,
    border: f32,
    min_scale: f32,
    max_scale: f32,
    pip_scale: f32,
    pip_margin: f32,
}

impl FloatingWindow {
    pub fn new(layout: Rect, config: &GestureConfig) -> Self {
        Self {
            layout,
            transform: Transform::IDENTITY,
            gesture: FloatingGesture::Idle,
            frames: FrameCoalescer::new(),
            border: config.resize_border_px,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            pip_scale: config.pip_scale,
            pip_margin: config.pip_margin_px,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn gesture(&self) -> FloatingGesture {
        self.gesture
    }

    /// True while move/up/cancel must be observed page-wide.
    pub fn is_capturing(&self) -> bool {
        self.gesture != FloatingGesture::Idle
    }

    /// Where the window currently is on screen.
    pub fn screen_rect(&self) -> Rect {
        rect_for(self.layout, self.transform)
    }

    /// The layout box moved, e.g. after a viewport resize.
    pub fn set_layout(&mut self, layout: Rect) {
        self.layout = layout;
    }

    /// Snap into picture-in-picture: `pip_scale`, bottom-left corner
    /// `pip_margin` away from the viewport's bottom-left.
    pub fn enter_pip(&mut self, viewport: Rect) {
        self.cancel_gesture();
        let scale = self.pip_scale.clamp(self.min_scale, self.max_scale);
        let left = viewport.left + self.pip_margin;
        let top =
            viewport.bottom() - self.pip_margin - self.layout.height * scale;
        self.transform = self.transform_for(left, top, scale);
    }

    pub fn leave_pip(&mut self) {
        self.cancel_gesture();
        self.transform = Transform::IDENTITY;
    }

    /// Start a gesture. Returns false when the press misses the window.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        let rect = self.screen_rect();
        if self.is_capturing() || !rect.contains(pointer) {
            return false;
        }

        self.gesture = if rect.in_border(pointer, self.border) {
            let handle = Corner::nearest(&rect, pointer);
            FloatingGesture::Resizing {
                handle,
                anchor: Corner::of(&rect, handle.opposite()),
            }
        } else {
            FloatingGesture::Moving {
                grab: Point::new(pointer.x - rect.left, pointer.y - rect.top),
            }
        };
        trace!("[Floating] Gesture started: {:?}", self.gesture);
        true
    }

    /// Queue the transform for this pointer position. Returns true when the
    /// host should request an animation frame.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let next = match self.gesture {
            FloatingGesture::Idle => return false,
            FloatingGesture::Moving { grab } => self.transform_for(
                pointer.x - grab.x,
                pointer.y - grab.y,
                self.transform.scale,
            ),
            FloatingGesture::Resizing { handle, anchor } => {
                self.resized(handle, anchor, pointer)
            }
        };
        self.frames.schedule(next)
    }

    /// Animation frame callback. Applies the latest queued transform.
    pub fn on_frame(&mut self) -> Option<Transform> {
        let next = self.frames.take()?;
        self.transform = next;
        Some(next)
    }

    /// Gesture finished. The last queued transform is kept.
    pub fn pointer_up(&mut self) {
        self.on_frame();
        self.gesture = FloatingGesture::Idle;
    }

    /// Gesture aborted. Listeners go away the same way as on release.
    pub fn pointer_cancel(&mut self) {
        self.pointer_up();
    }

    fn cancel_gesture(&mut self) {
        self.frames.clear();
        self.gesture = FloatingGesture::Idle;
    }

    fn resized(
        &self,
        handle: Corner,
        anchor: Point,
        pointer: Point,
    ) -> Transform {
        let scale_x =
            (pointer.x - anchor.x).abs() / self.layout.width.max(1.0);
        let scale_y =
            (pointer.y - anchor.y).abs() / self.layout.height.max(1.0);
        let scale = scale_x.max(scale_y).clamp(self.min_scale, self.max_scale);

        let width = self.layout.width * scale;
        let height = self.layout.height * scale;
        let left = match handle {
            Corner::TopRight | Corner::BottomRight => anchor.x,
            Corner::TopLeft | Corner::BottomLeft => anchor.x - width,
        };
        let top = match handle {
            Corner::BottomLeft | Corner::BottomRight => anchor.y,
            Corner::TopLeft | Corner::TopRight => anchor.y - height,
        };
        self.transform_for(left, top, scale)
    }

    fn transform_for(&self, left: f32, top: f32, scale: f32) -> Transform {
        Transform {
            translate_x: left - self.layout.left,
            translate_y: top - self.layout.top,
            scale,
        }
    }
}

fn rect_for(layout: Rect, transform: Transform) -> Rect {
    Rect::new(
        layout.left + transform.translate_x,
        layout.top + transform.translate_y,
        layout.width * transform.scale,
        layout.height * transform.scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> FloatingWindow {
        FloatingWindow::new(
            Rect::new(100.0, 100.0, 320.0, 180.0),
            &GestureConfig::default(),
        )
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 0.01, "{a} != {b}");
    }

    #[test]
    fn bottom_right_resize_keeps_top_left_fixed() {
        let mut win = window();
        let before = win.screen_rect().top_left();

        assert!(win.pointer_down(Point::new(415.0, 275.0)));
        assert!(matches!(
            win.gesture(),
            FloatingGesture::Resizing {
                handle: Corner::BottomRight,
                ..
            }
        ));

        for pointer in [
            Point::new(500.0, 300.0),
            Point::new(260.0, 190.0),
            Point::new(700.0, 250.0),
        ] {
            win.pointer_move(pointer);
            win.on_frame();
            let top_left = win.screen_rect().top_left();
            assert_close(top_left.x, before.x);
            assert_close(top_left.y, before.y);
        }
        win.pointer_up();

        // 600px of width over a 320px layout.
        assert_close(win.transform().scale, 600.0 / 320.0);
        assert_close(win.screen_rect().top_left().x, before.x);
    }

    #[test]
    fn top_left_resize_anchors_bottom_right() {
        let mut win = window();
        let rect = win.screen_rect();
        let anchor = Point::new(rect.right(), rect.bottom());

        win.pointer_down(Point::new(103.0, 103.0));
        win.pointer_move(Point::new(260.0, 200.0));
        win.pointer_up();

        let after = win.screen_rect();
        assert_close(after.right(), anchor.x);
        assert_close(after.bottom(), anchor.y);
        assert!(win.transform().scale < 1.0);
    }

    #[test]
    fn scale_is_clamped() {
        let mut win = window();
        win.pointer_down(Point::new(415.0, 275.0));
        win.pointer_move(Point::new(5_000.0, 5_000.0));
        win.on_frame();
        assert_close(win.transform().scale, 2.0);

        win.pointer_move(Point::new(100.0, 100.0));
        win.on_frame();
        assert_close(win.transform().scale, 0.1);
    }

    #[test]
    fn interior_press_moves_without_clamping() {
        let mut win = window();
        assert!(win.pointer_down(Point::new(200.0, 150.0)));
        assert!(matches!(win.gesture(), FloatingGesture::Moving { .. }));

        win.pointer_move(Point::new(-400.0, -300.0));
        win.pointer_up();

        let rect = win.screen_rect();
        assert_close(rect.left, -500.0);
        assert_close(rect.top, -350.0);
        assert_close(win.transform().scale, 1.0);
        assert!(!win.is_capturing());
    }

    #[test]
    fn moves_are_coalesced_per_frame() {
        let mut win = window();
        win.pointer_down(Point::new(200.0, 150.0));

        assert!(win.pointer_move(Point::new(210.0, 150.0)));
        assert!(!win.pointer_move(Point::new(220.0, 150.0)));
        assert!(!win.pointer_move(Point::new(230.0, 150.0)));
        assert_eq!(win.transform(), Transform::IDENTITY);

        let applied = win.on_frame().unwrap();
        assert_close(applied.translate_x, 30.0);
        assert_eq!(win.on_frame(), None);
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut win = window();
        assert!(!win.pointer_down(Point::new(10.0, 10.0)));
        assert!(!win.pointer_move(Point::new(20.0, 20.0)));
    }

    #[test]
    fn pip_placement_and_reset() {
        let mut win = window();
        let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);

        win.enter_pip(viewport);
        let rect = win.screen_rect();
        assert_close(win.transform().scale, 0.5);
        assert_close(rect.left, 16.0);
        assert_close(rect.bottom(), 720.0 - 16.0);

        win.leave_pip();
        assert_eq!(win.transform(), Transform::IDENTITY);
    }
}
