//! Core types shared across the yuseong crates.

mod options;
mod scale;
mod speed;

pub use options::MeteorOptions;
pub use scale::DotScale;
pub use speed::AnimationSpeed;
