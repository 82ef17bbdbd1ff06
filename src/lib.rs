mod config;
mod constants;
mod dial;
mod error;
mod geometry;
mod rendering;
mod state;
pub mod svg;

pub use config::{DialConfig, Direction};
pub use dial::Dial;
pub use error::DialError;
pub use rendering::DialWidget;
pub use state::{AnimationState, AnimationStatus};
