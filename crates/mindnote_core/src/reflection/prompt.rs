//! Prompt construction for reflection requests.

use crate::model::note::UNTITLED;
use crate::reflection::error::ReflectionError;

/// System instruction sent with every configured request.
pub const SYSTEM_INSTRUCTION: &str = "You are a thoughtful reflection assistant. Help users think deeper about their notes by providing insights, asking thought-provoking questions, and suggesting different perspectives. Keep responses concise but meaningful, around 150-200 words.";

/// Placeholder returned when no credential is configured.
pub const MOCK_REFLECTION: &str = "Here are some thoughtful reflections on your note:

🤔 Key Insights:
Your writing reveals some interesting patterns and themes worth exploring further.

❓ Questions to Consider:
- What emotions or experiences might have influenced these thoughts?
- How do these ideas connect to your broader goals or values?
- What would you want to explore more deeply?

💡 Different Perspectives:
Consider looking at this from the viewpoint of someone with different experiences or cultural background.

✅ Potential Next Steps:
You might want to research related topics, discuss with others, or write a follow-up reflection.

This is a demo response since no API key is configured. Add your OpenAI API key to get real reflections!";

/// Validated input for one reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionRequest {
    title: String,
    content: String,
}

impl ReflectionRequest {
    /// Rejects notes with blank content and a blank or placeholder title.
    ///
    /// Accepted text is kept as written; trimming only decides emptiness.
    pub fn new(title: &str, content: &str) -> Result<Self, ReflectionError> {
        let placeholder_title = matches!(title.trim(), "" | UNTITLED);
        if placeholder_title && content.trim().is_empty() {
            return Err(ReflectionError::EmptyNote);
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn prompt(&self) -> String {
        build_prompt(&self.title, &self.content)
    }
}

/// Embeds a note into the fixed reflection template.
pub fn build_prompt(title: &str, content: &str) -> String {
    let title = if title.trim().is_empty() {
        UNTITLED
    } else {
        title
    };
    format!(
        "Please help me reflect on this note I wrote:

Title: {title}

Content: {content}

Please provide thoughtful reflection questions, insights, or suggestions that could help me think deeper about what I wrote. Focus on:
1. Key themes or patterns you notice
2. Questions that might help me explore the topic further
3. Different perspectives I might consider
4. Potential next steps or actions

Keep your response concise but meaningful."
    )
}
