pub const APOLOGY_ANSWER: &str =
    "I apologize, but there was an error processing your request. Please try again.";

/// A single question and answer pair. Entries are never mutated once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationEntry {
    question: String,
    answer: String,
}

impl ConversationEntry {
    pub fn new(question: &str, answer: &str) -> ConversationEntry {
        return ConversationEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        };
    }

    pub fn apology(question: &str) -> ConversationEntry {
        return ConversationEntry::new(question, APOLOGY_ANSWER);
    }

    pub fn question(&self) -> &str {
        return &self.question;
    }

    pub fn answer(&self) -> &str {
        return &self.answer;
    }

    pub fn is_apology(&self) -> bool {
        return self.answer == APOLOGY_ANSWER;
    }
}
