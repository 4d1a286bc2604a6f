/// Three-question style quiz
///
/// Each answer advances to the next question; the last one hands the full
/// answer set back for submission. Completion never depends on the backend:
/// a failed submission still finishes the quiz, just without a style tag.

use super::data::{QuestionId, QuizAnswers};

pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

pub static QUESTIONS: [Question; 3] = [
    Question {
        id: QuestionId::Vibe,
        prompt: "What's your room vibe?",
        options: &["Cozy", "Modern", "Boho", "Minimalist"],
    },
    Question {
        id: QuestionId::Priority,
        prompt: "What matters most to you?",
        options: &["Comfort", "Aesthetics", "Function"],
    },
    Question {
        id: QuestionId::Budget,
        prompt: "What's your budget style?",
        options: &["Budget-friendly", "Mid-range", "Splurge-worthy"],
    },
];

/// Outcome of picking an option
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Moved on to the next question
    Advanced,
    /// Last question answered; submit these answers
    Submit(QuizAnswers),
    /// Click arrived while saving, or the option is not on the current question
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct StyleQuiz {
    step: usize,
    answers: QuizAnswers,
    saving: bool,
}

impl StyleQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.step]
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[cfg(test)]
    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Record an answer for the current question
    pub fn select(&mut self, option: &str) -> Step {
        let question = self.current();
        if self.saving || !question.options.contains(&option) {
            return Step::Ignored;
        }

        self.answers.set(question.id, option);

        if self.step < QUESTIONS.len() - 1 {
            self.step += 1;
            Step::Advanced
        } else {
            self.saving = true;
            Step::Submit(self.answers.clone())
        }
    }

    /// Finish with whatever style tag the backend produced (maybe none)
    pub fn complete(self, style_tag: Option<String>) -> (Option<String>, QuizAnswers) {
        (style_tag, self.answers)
    }
}
