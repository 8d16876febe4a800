// Chat assistant: reply formatting, transcript state, terminal rendering.

pub mod formatter;
pub mod render;
pub mod transcript;

pub use formatter::{format_reply, Block, Inline, RichText};
pub use transcript::{ChatMessage, Speaker, Transcript};
