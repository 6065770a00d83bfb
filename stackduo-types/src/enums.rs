use serde::{Deserialize, Serialize};
use std::fmt;

/// The `PostTypeId` values the reports care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostType {
    Question,
    Answer,
}

impl PostType {
    pub fn id(&self) -> i64 {
        match self {
            PostType::Question => 1,
            PostType::Answer => 2,
        }
    }
}

/// One of the five dual-path reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    TopLocations,
    LinkedQuestions,
    TopCommentedQuestions,
    AnswerHeavyUsers,
    AverageAnswers,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::TopLocations,
        Task::LinkedQuestions,
        Task::TopCommentedQuestions,
        Task::AnswerHeavyUsers,
        Task::AverageAnswers,
    ];

    /// 1-based task number
    pub fn number(&self) -> u8 {
        match self {
            Task::TopLocations => 1,
            Task::LinkedQuestions => 2,
            Task::TopCommentedQuestions => 3,
            Task::AnswerHeavyUsers => 4,
            Task::AverageAnswers => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::TopLocations => "top-locations",
            Task::LinkedQuestions => "linked-questions",
            Task::TopCommentedQuestions => "top-commented-questions",
            Task::AnswerHeavyUsers => "answer-heavy-users",
            Task::AverageAnswers => "average-answers",
        }
    }

    /// Accepts either the task number or its slug
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == s || task.number().to_string() == s)
    }

    /// Output columns, in order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Task::TopLocations => &["Location", "Count"],
            Task::LinkedQuestions => &["Title", "NumLinks"],
            Task::TopCommentedQuestions => &[
                "Title",
                "CommentCount",
                "ViewCount",
                "CommentsTotalScore",
                "DisplayName",
                "Reputation",
                "Location",
            ],
            Task::AnswerHeavyUsers => &[
                "DisplayName",
                "QuestionsNumber",
                "AnswersNumber",
                "Location",
                "Reputation",
                "UpVotes",
                "DownVotes",
            ],
            Task::AverageAnswers => {
                &["AccountId", "DisplayName", "Location", "AverageAnswersCount"]
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {} ({})", self.number(), self.as_str())
    }
}
