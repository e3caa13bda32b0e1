// extensions/mod.rs
//
// Cosmetic extensions. Stages opt in; gameplay rules never read them.

pub mod motion;

pub use motion::{lerp, Easing, Spring, Transition};
