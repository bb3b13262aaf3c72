use parley_persist::{Role, Turn};

use crate::mode::Mode;
use crate::templates::{CLOSING_INSTRUCTION, CONTEXT_FRAMING, CONTEXT_USAGE_NOTE, RULES};

/// Render a context window and mode into a single completion prompt
///
/// Earlier turns are narrated in the second person ("The user said",
/// "You answered"), never as `User:`/`Assistant:` labels. The last turn is
/// quoted as the message to answer; when it is not a user turn the quoted
/// text is empty.
pub fn build_prompt(window: &[Turn], mode: Mode) -> String {
    let (latest, previous) = match window.split_last() {
        Some((latest, previous)) => (Some(latest), previous),
        None => (None, window),
    };

    let latest_user = latest
        .filter(|turn| turn.is_user())
        .map(|turn| turn.content.as_str())
        .unwrap_or("");

    let mut prompt = String::new();
    prompt.push_str(mode.preamble());
    prompt.push('\n');
    prompt.push_str(RULES);
    prompt.push('\n');
    prompt.push_str(&render_context(previous));
    prompt.push_str("The user has now said: \"");
    prompt.push_str(latest_user);
    prompt.push_str("\"\n\n");
    prompt.push_str(CLOSING_INSTRUCTION);

    prompt
}

/// Context block for the turns before the latest one, empty when there are none
fn render_context(previous: &[Turn]) -> String {
    if previous.is_empty() {
        return String::new();
    }

    let mut block = String::new();
    block.push_str(CONTEXT_FRAMING);
    block.push('\n');
    for turn in previous {
        let lead = match turn.role {
            Role::User => "- The user said: ",
            Role::Assistant => "- You answered: ",
        };
        block.push_str(lead);
        block.push_str(&turn.content);
        block.push('\n');
    }
    block.push('\n');
    block.push_str(CONTEXT_USAGE_NOTE);
    block.push_str("\n\n");

    block
}
