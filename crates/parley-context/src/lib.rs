mod mode;
mod window;
mod prompt;
mod templates;

pub use mode::Mode;
pub use window::{context_window, CONTEXT_WINDOW_TURNS};
pub use prompt::build_prompt;
pub use templates::{
    CONTEXT_FRAMING, CONTEXT_USAGE_NOTE, CLOSING_INSTRUCTION, RULES,
};
