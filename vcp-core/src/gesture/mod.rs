//! Pointer gesture state machines. Hosts feed raw pointer coordinates in
//! CSS pixels and read back progress values or window transforms.

mod floating;
mod frame;
mod geometry;
mod seek;

pub use floating::{Corner, FloatingGesture, FloatingWindow, Transform};
pub use frame::FrameCoalescer;
pub use geometry::{Point, Rect};
pub use seek::{SeekBar, SeekPhase};
