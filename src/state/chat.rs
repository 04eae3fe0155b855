//! Chat transcript for the assistant panel

/// Opening message shown when the explorer loads
pub const WELCOME_MESSAGE: &str = "Based on your situation, I've identified some programs that might help. You can ask me questions about any of these programs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Transcript plus the line being typed
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    /// A question is waiting for its answer
    pub awaiting_answer: bool,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                text: WELCOME_MESSAGE.to_string(),
            }],
            input: String::new(),
            awaiting_answer: false,
        }
    }

    /// Take the typed question and append it to the transcript.
    /// Returns None for blank input or while an answer is pending.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.awaiting_answer {
            return None;
        }
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return None;
        }
        self.input.clear();
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: question.clone(),
        });
        self.awaiting_answer = true;
        Some(question)
    }

    pub fn push_answer(&mut self, text: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text,
        });
        self.awaiting_answer = false;
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_has_welcome() {
        let chat = ChatTranscript::new();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, ChatRole::Assistant);
        assert_eq!(chat.messages[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_submit_input_appends_user_message() {
        let mut chat = ChatTranscript::new();
        chat.input = "  how do I apply?  ".to_string();
        assert_eq!(chat.submit_input().as_deref(), Some("how do I apply?"));
        assert!(chat.input.is_empty());
        assert!(chat.awaiting_answer);
        assert_eq!(chat.messages.last().unwrap().role, ChatRole::User);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = ChatTranscript::new();
        chat.input = "   ".to_string();
        assert!(chat.submit_input().is_none());
        assert_eq!(chat.messages.len(), 1);
    }

    #[test]
    fn test_only_one_outstanding_question() {
        let mut chat = ChatTranscript::new();
        chat.input = "first".to_string();
        chat.submit_input();
        chat.input = "second".to_string();
        assert!(chat.submit_input().is_none());
        assert_eq!(chat.input, "second");

        chat.push_answer("answer".to_string());
        assert!(!chat.awaiting_answer);
        assert_eq!(chat.submit_input().as_deref(), Some("second"));
    }
}
