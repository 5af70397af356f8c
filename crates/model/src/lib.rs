//! Whirl Slider Model
//!
//! Defines the core data contracts for the slider:
//! - **Config:** The per-breakpoint option table and the resolved
//!   per-breakpoint [`SliderConfig`]
//! - **Events:** Structured pan gesture events delivered by the host's
//!   gesture-source collaborator
//! - **Layout:** Page/item width math and the visible-window offset
//!   formula
//!
//! Everything here is plain data. Index state, scheduling, and gesture
//! interpretation live in `whirl-engine`.

pub mod config;
pub mod event;
pub mod layout;

pub use config::*;
pub use event::*;
pub use layout::*;
