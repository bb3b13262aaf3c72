use parley_persist::Turn;

/// How many of the most recent turns are shown to the model
pub const CONTEXT_WINDOW_TURNS: usize = 8;

/// The last `size` turns of `history` (all of it when shorter)
pub fn context_window(history: &[Turn], size: usize) -> &[Turn] {
    let start = history.len().saturating_sub(size);
    &history[start..]
}
