use crate::model::request::GenerationRequest;

/// Number of story characters quoted back in the sequel hook prompt.
pub const SEQUEL_EXCERPT_CHARS: usize = 500;

/// Builds the prompts sent to the model.
/// Pure formatting: no networking, no validation.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Instructional template followed by the user's own prompt.
    pub fn story(request: &GenerationRequest) -> String {
        let mut prompt = String::new();

        push_story_template(&mut prompt, request);
        prompt.push_str(request.prompt());

        prompt
    }

    pub fn analysis(story: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "\nAnalyze the following story and provide:\n\
1. Primary themes\n\
2. Character development score (1-5)\n\
3. Pacing assessment\n\
4. Emotional impact summary\n\
5. Potential improvements\n\n",
        );
        push_story_section(&mut prompt, story);

        prompt
    }

    pub fn extraction(story: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "\nExtract from the story:\n\
- Main characters\n\
- Key locations\n\
- Central conflict\n\
- Resolution method\n\
- 3 most important symbols\n\n\
Return in JSON format with keys: characters, locations, conflict, resolution, symbols\n\n",
        );
        push_story_section(&mut prompt, story);

        prompt
    }

    pub fn sequel_hook(story: &str) -> String {
        format!(
            "Create a sequel hook for this story: {}...",
            excerpt(story, SEQUEL_EXCERPT_CHARS)
        )
    }
}

fn push_story_template(prompt: &mut String, request: &GenerationRequest) {
    prompt.push_str(
        "\n**Role**: Professional Story Generator\n\
**Task**: Create an engaging narrative based on user inputs\n\n\
**Requirements**:\n",
    );

    prompt.push_str(&format!(
        "- Incorporate keywords: {}\n",
        request.keywords().join(", ")
    ));
    prompt.push_str(&format!("- Maintain {} mood throughout\n", request.mood()));
    prompt.push_str(&format!("- Perfectly fit {} genre\n", request.genre()));

    prompt.push_str(
        "- Clear story structure: beginning → conflict → resolution\n\
- Length: 300-500 words\n\
- Use vivid descriptions and natural dialogue\n\n\
**Story Structure**:\n\
1. Setup: Introduce characters and setting\n\
2. Conflict: Present central challenge\n\
3. Resolution: Deliver satisfying conclusion\n\n\
**User Prompt**:\n",
    );
}

fn push_story_section(prompt: &mut String, story: &str) {
    prompt.push_str("Story:\n");
    prompt.push_str(story);
    prompt.push('\n');
}

/// First `max_chars` characters of `text`, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
