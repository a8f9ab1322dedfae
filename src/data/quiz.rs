//! The secure-coding quiz: questions, answer key and grading

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum percentage needed to pass
pub const PASS_PERCENTAGE: u32 = 80;

pub const PASS_MESSAGE: &str =
    "ACCESS GRANTED. You think like a defender. Go ship some secure code.";
pub const FAIL_MESSAGE: &str =
    "ACCESS DENIED. Review the modules (type 'help') and try again.";

/// One of the answer options in a question group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    pub fn letter(&self) -> char {
        match self {
            Choice::A => 'a',
            Choice::B => 'b',
            Choice::C => 'c',
            Choice::D => 'd',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Choice::A),
            'b' => Some(Choice::B),
            'c' => Some(Choice::C),
            'd' => Some(Choice::D),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Choice::A => Choice::B,
            Choice::B => Choice::C,
            Choice::C => Choice::D,
            Choice::D => Choice::A,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Choice::A => Choice::D,
            Choice::B => Choice::A,
            Choice::C => Choice::B,
            Choice::D => Choice::C,
        }
    }
}

/// A single-choice question group
#[derive(Debug, Clone)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: Choice,
}

impl Question {
    pub fn option(&self, choice: Choice) -> &'static str {
        let idx = Choice::ALL.iter().position(|c| *c == choice).unwrap_or(0);
        self.options[idx]
    }
}

/// Question key to correct choice
pub type AnswerKey = BTreeMap<String, Choice>;

/// What the user currently has ticked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    picked: BTreeMap<String, Choice>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, question: &str, choice: Choice) {
        self.picked.insert(question.to_string(), choice);
    }

    pub fn get(&self, question: &str) -> Option<Choice> {
        self.picked.get(question).copied()
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }
}

/// Outcome of grading one submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub passed: bool,
}

impl QuizResult {
    pub fn score_line(&self) -> String {
        format!("You scored {}/{} ({}%)", self.score, self.total, self.percentage)
    }

    pub fn summary(&self) -> String {
        format!(
            "Quiz completed! Score: {}/{} ({}%)",
            self.score, self.total, self.percentage
        )
    }

    pub fn message(&self) -> &'static str {
        if self.passed {
            PASS_MESSAGE
        } else {
            FAIL_MESSAGE
        }
    }
}

/// Count exact matches against the key. Unanswered questions score nothing.
pub fn grade(key: &AnswerKey, selections: &Selections) -> QuizResult {
    let total = key.len();
    let score = key
        .iter()
        .filter(|(question, expected)| selections.get(question) == Some(**expected))
        .count();

    // Integer arithmetic first so 3/5 prints as 60, not 60.00000000000001
    let percentage = if total == 0 {
        0.0
    } else {
        (score * 100) as f64 / total as f64
    };
    let passed = total > 0 && score as u32 * 100 >= PASS_PERCENTAGE * total as u32;

    QuizResult {
        score,
        total,
        percentage,
        passed,
    }
}

/// The built-in five question quiz
#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question {
                    key: "q1",
                    prompt: "What is the safest way to store user passwords?",
                    options: [
                        "Base64 encode them",
                        "Encrypt them with AES and keep the key in the repo",
                        "Hash them with bcrypt and a per-user salt",
                        "Hash them with MD5",
                    ],
                    answer: Choice::C,
                },
                Question {
                    key: "q2",
                    prompt: "Where should API keys live in your application?",
                    options: [
                        "In environment variables or a secrets manager",
                        "Hard-coded in the source",
                        "In a comment so the team can find them",
                        "In the frontend bundle",
                    ],
                    answer: Choice::A,
                },
                Question {
                    key: "q3",
                    prompt: "Which query is safe from SQL injection?",
                    options: [
                        "\"SELECT * FROM users WHERE id = \" + id",
                        "format!(\"SELECT * FROM users WHERE id = {}\", id)",
                        "A parameterized query: SELECT * FROM users WHERE id = $1",
                        "Any query, as long as the input is trimmed",
                    ],
                    answer: Choice::C,
                },
                Question {
                    key: "q4",
                    prompt: "What is the best defense against XSS?",
                    options: [
                        "Disable JavaScript for all users",
                        "Block the word <script> in input",
                        "Escape output and set a Content Security Policy",
                        "Use POST instead of GET",
                    ],
                    answer: Choice::C,
                },
                Question {
                    key: "q5",
                    prompt: "How should session tokens be protected?",
                    options: [
                        "Store them in localStorage",
                        "Put them in the URL",
                        "Use HttpOnly cookies and CSRF tokens",
                        "Make them never expire",
                    ],
                    answer: Choice::C,
                },
            ],
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answer_key(&self) -> AnswerKey {
        self.questions
            .iter()
            .map(|q| (q.key.to_string(), q.answer))
            .collect()
    }

    pub fn grade(&self, selections: &Selections) -> QuizResult {
        grade(&self.answer_key(), selections)
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::builtin()
    }
}
