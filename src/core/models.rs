/// Notion property names of the vocabulary database columns.
pub mod fields {
    pub const FRONT: &str = "英単語";
    pub const BACK: &str = "日本語";
    pub const NOTE: &str = "メモ";
    pub const PART_OF_SPEECH: &str = "品詞";
    pub const STATUS: &str = "正誤";
    pub const MISTAKES: &str = "間違えた回数";
    pub const ATTEMPTED: &str = "やった日";

    pub const EXAMPLE_SLOTS: usize = 4;

    pub fn example_front(slot: usize) -> String {
        format!("例文英語{}", slot)
    }

    pub fn example_back(slot: usize) -> String {
        format!("例文日本語{}", slot)
    }
}

/// Status option names used by the 正誤 column.
pub mod status {
    pub const CORRECT: &str = "正";
    pub const INCORRECT: &str = "誤";
    pub const UNANSWERED: &str = "未";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub page_id: String,             // Remote page identifier, never changes
    pub front: String,               // Prompt side (英単語)
    pub back: String,                // Answer side (日本語)
    pub note: String,                // Free-form memo (メモ)
    pub part_of_speech: String,      // 品詞 tag, may be empty
    pub status: String,              // Raw 正誤 status name as stored remotely
    pub mistake_count: u32,          // 間違えた回数, only ever grows
    pub attempted_at: Option<String>, // やった日 ISO-8601, None when never attempted
    pub examples: Vec<ExamplePair>,  // Up to four example sentence pairs
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamplePair {
    pub front: String,
    pub back: String,
}

impl Record {
    pub fn is_correct(&self) -> bool {
        self.status == status::CORRECT
    }

    pub fn is_incorrect(&self) -> bool {
        self.status == status::INCORRECT
    }

    pub fn is_unanswered(&self) -> bool {
        self.status.is_empty() || self.status == status::UNANSWERED
    }
}

/// How the user graded the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn status_name(self) -> &'static str {
        match self {
            Outcome::Correct => status::CORRECT,
            Outcome::Incorrect => status::INCORRECT,
        }
    }
}
