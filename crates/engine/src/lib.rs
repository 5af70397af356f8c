//! Whirl Engine — the slider navigation and motion core
//!
//! Decides which items are visible, animates transitions between visible
//! windows, and interprets pan gestures as navigation commands:
//! - **Resolver:** viewport width + option table → resolved config
//! - **Index:** clamping, wrap-around, and thumbnails-page snapping
//! - **Motion:** the four move kinds behind a single busy gate
//! - **Gesture:** pan stream → velocity-weighted index deltas
//! - **Autorun:** pausable periodic stepping in the last manual direction
//! - **Widget:** the facade that owns the state and wires it all up
//!
//! This crate is pure computation on a virtual clock — no I/O, no
//! timers of its own. The host supplies `now_ms`, a [`RenderSurface`],
//! and the pan event stream; the core answers with render operations,
//! notifications, and the next instant it wants to be woken at.

pub mod autorun;
pub mod gesture;
pub mod index;
pub mod motion;
pub mod render;
pub mod resolver;
pub mod widget;

pub use autorun::AutorunScheduler;
pub use gesture::{GestureContext, GestureInterpreter, PanOutcome};
pub use index::IndexStateMachine;
pub use motion::{MotionScheduler, MoveContext, MoveKind};
pub use render::{RecordingSurface, RenderOp, RenderSurface};
pub use resolver::resolve;
pub use widget::{ArrowState, Slider, SliderEvent};
