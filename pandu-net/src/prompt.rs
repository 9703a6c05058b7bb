//! Context blocks for a dialogue collaborator.
//!
//! The avatar does not generate dialogue itself. A chat service that does
//! can prepend these blocks to its own system prompt so replies match the
//! companion's mood and what the user just did.

use pandu_core::PhysicalInteraction;

/// System prompt skeleton for a companion reply.
pub const COMPANION_SYSTEM: &str = r"You are {name}, the user's companion.
Stay in character. Keep replies short and warm unless your mood says otherwise.

{mood_block}";

/// Extra block appended when the reply follows a touch.
pub const TOUCH_FOLLOWUP: &str = r"{interaction_block}

React to the touch first, in one short sentence, before anything else.";

/// Simple template interpolation.
///
/// Replaces `{key}` with the corresponding value. Unknown keys are left
/// as they are.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Full system prompt: persona, mood block and (optionally) the touch that
/// prompted the reply.
#[must_use]
pub fn companion_prompt(name: &str, mood_block: &str, touch: Option<&PhysicalInteraction>) -> String {
    let mut prompt = render_template(COMPANION_SYSTEM, &[("name", name), ("mood_block", mood_block)]);
    if let Some(touch) = touch {
        let block = touch.to_model_context();
        prompt.push_str("\n\n");
        prompt.push_str(&render_template(TOUCH_FOLLOWUP, &[("interaction_block", &block)]));
    }
    prompt
}
