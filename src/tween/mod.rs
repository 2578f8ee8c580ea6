//! Tweens, easing curves, and cyclic tween chains.

pub use self::easing::Easing;
pub use self::ring::TweenRing;
pub use self::tween::{Lerp, Tween, MIN_DURATION};

mod easing;
mod ring;
mod tween;
