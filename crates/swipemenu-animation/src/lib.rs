//! Animation primitives for swipemenu.
//!
//! Animations here are pure step functions: the owner feeds frame timestamps
//! and reads back a value. There is no scheduler and no callback registration,
//! so dropping an animation is all it takes to cancel it.

pub mod animation;

pub use animation::{AnimationSpec, Easing, Lerp, Tween};
