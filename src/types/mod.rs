mod models;
mod phase;

pub use models::*;
pub use phase::{Alliance, Phase, Winner};
