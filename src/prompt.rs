//! Prompt text sent to the model.

use crate::models::Couple;

/// System instruction attached to every generateContent call.
pub const SYSTEM_INSTRUCTION: &str = "You are a professional poet. When given a prompt to create a poem, \
respond ONLY with the poem itself. Do not include any introductions, explanations, or closing remarks. \
Do not start with phrases like 'Here's a poem' or 'I hope you enjoy this'. \
Do not include titles unless specifically requested. Just output the poem directly.";

const OPENING: &str = "Transform the following personal promise into a graceful haiku.\n\
Let the poem reflect quiet elegance, emotional depth, and a sense of timeless commitment.";

const FORMAT: &str = "Format:\n\
- Haiku\n\
- 3 lines\n\
- 5-7-5 syllables\n\
- No titles, no explanations, no follow-up.\n\
- No introduction. No explanation. No outro. Only the haiku.";

const GUIDELINES: &str = "Guidelines:\n\
- The poem should be a single haiku, not a list of haikus.\n\
- Only output the haiku, with no titles, no explanations, no follow-up.\n\
- Follow the traditional haiku structure: 3 lines with 5-7-5 syllables.\n\
- Evoke a sense of stillness, sincerity, and permanence, like a promise set in stone.\n\
- Keep the tone delicate, refined, and emotionally evocative.\n\
- Let each word carry the weight of love, memory, and beauty.\n\
- The poem should be in the style of a traditional haiku, not a modern poem.\n\
- No introduction. No explanation. No outro. Only the haiku.";

/// Builds the haiku prompt for a promise. Pure: same input, same output.
///
/// The names clause is only added when at least one name is non-blank;
/// a missing name is replaced with "a bride" or "a groom".
pub fn build_prompt(story: &str, names: Option<&Couple>) -> String {
    let mut prompt = String::with_capacity(OPENING.len() + FORMAT.len() + GUIDELINES.len() + story.len() + 64);
    prompt.push_str(OPENING);
    prompt.push('\n');

    if let Some(clause) = names.and_then(names_clause) {
        prompt.push_str(&clause);
        prompt.push('\n');
    }

    prompt.push_str("Promise: ");
    prompt.push_str(story);
    prompt.push_str("\n\n");
    prompt.push_str(FORMAT);
    prompt.push_str("\n\n");
    prompt.push_str(GUIDELINES);
    prompt
}

fn names_clause(names: &Couple) -> Option<String> {
    if names.is_blank() {
        return None;
    }
    let bride = non_blank(&names.bride).unwrap_or("a bride");
    let groom = non_blank(&names.groom).unwrap_or("a groom");
    Some(format!("This is for {bride} and {groom}."))
}

fn non_blank(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}
