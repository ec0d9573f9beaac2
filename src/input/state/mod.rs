mod core;
mod pointer;
mod text;

pub use self::core::{InputState, InteractionState, PendingText};
