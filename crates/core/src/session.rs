//! In-memory state of a quiz attempt and of a playlist roadmap.
//!
//! Nothing here is persisted; a session lives as long as the command that
//! created it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::{PlaylistItem, QuizQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceTier {
    Perfect,
    Excellent,
    Good,
    NiceTry,
    KeepPracticing,
}

impl PerformanceTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            PerformanceTier::Perfect
        } else if percentage >= 80.0 {
            PerformanceTier::Excellent
        } else if percentage >= 60.0 {
            PerformanceTier::Good
        } else if percentage >= 40.0 {
            PerformanceTier::NiceTry
        } else {
            PerformanceTier::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceTier::Perfect => "Perfect Score! You're a Master! 🎯",
            PerformanceTier::Excellent => "Excellent Work! Almost There! 🌟",
            PerformanceTier::Good => "Good Job! Keep Learning! 📚",
            PerformanceTier::NiceTry => "Nice Try! Room for Improvement! 💪",
            PerformanceTier::KeepPracticing => "Keep Practicing! You Can Do Better! 🎯",
        }
    }
}

/// Per-question outcome shown after the quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAnalysis {
    pub correct: bool,
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct_option: String },
}

#[derive(Debug, Default)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: HashMap<u32, usize>,
    revealed: HashSet<u32>,
    results_shown: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Record the chosen option for a question and reveal its feedback.
    ///
    /// Returns `None` when the question is unknown, the option is out of
    /// range, or the question was already answered.
    pub fn answer(&mut self, question_id: u32, option: usize) -> Option<AnswerOutcome> {
        let question = self.questions.iter().find(|q| q.id == question_id)?;
        if option >= question.options.len() || self.revealed.contains(&question_id) {
            return None;
        }

        self.answers.insert(question_id, option);
        self.revealed.insert(question_id);

        if option == question.correct_answer {
            Some(AnswerOutcome::Correct)
        } else {
            Some(AnswerOutcome::Incorrect {
                correct_option: question.correct_option().to_string(),
            })
        }
    }

    pub fn user_answer(&self, question_id: u32) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    pub fn is_revealed(&self, question_id: u32) -> bool {
        self.revealed.contains(&question_id)
    }

    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.answers.len() == self.questions.len()
    }

    pub fn show_results(&mut self) {
        self.results_shown = true;
    }

    pub fn results_shown(&self) -> bool {
        self.results_shown
    }

    /// Count of questions whose recorded answer matches the correct option.
    pub fn calculate_score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct_answer))
            .count()
    }

    pub fn calculate_percentage(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.calculate_score() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn performance(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(self.calculate_percentage())
    }

    pub fn question_analysis(&self) -> Vec<QuestionAnalysis> {
        self.questions
            .iter()
            .map(|q| {
                let chosen = self.answers.get(&q.id);
                QuestionAnalysis {
                    correct: chosen == Some(&q.correct_answer),
                    question: q.text.clone(),
                    user_answer: chosen.and_then(|i| q.options.get(*i)).cloned(),
                    correct_answer: q.correct_option().to_string(),
                }
            })
            .collect()
    }
}

/// Completion tracking over the videos of one playlist.
#[derive(Debug, Default)]
pub struct RoadmapProgress {
    videos: Vec<PlaylistItem>,
    completed: HashSet<String>,
}

impl RoadmapProgress {
    pub fn new(videos: Vec<PlaylistItem>) -> Self {
        Self {
            videos,
            completed: HashSet::new(),
        }
    }

    pub fn videos(&self) -> &[PlaylistItem] {
        &self.videos
    }

    /// Flip the completion flag of a video; returns the new state, or `None`
    /// for ids outside the playlist.
    pub fn toggle(&mut self, video_id: &str) -> Option<bool> {
        if !self.videos.iter().any(|v| v.id == video_id) {
            return None;
        }

        if self.completed.remove(video_id) {
            Some(false)
        } else {
            self.completed.insert(video_id.to_string());
            Some(true)
        }
    }

    pub fn is_completed(&self, video_id: &str) -> bool {
        self.completed.contains(video_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Completed share of the playlist as a rounded percentage.
    pub fn progress(&self) -> u32 {
        if self.videos.is_empty() {
            return 0;
        }
        (self.completed.len() as f64 / self.videos.len() as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        (1..=10)
            .map(|id| QuizQuestion {
                id,
                text: format!("Question {}?", id),
                options: ["a", "b", "c", "d"].map(String::from),
                correct_answer: (id % 4) as usize,
            })
            .collect()
    }

    fn video(id: &str) -> PlaylistItem {
        PlaylistItem {
            id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            thumbnail_url: String::new(),
            duration: "00:00".to_string(),
            position: 0,
        }
    }

    #[test]
    fn test_score_counts_matching_answers() {
        let mut session = QuizSession::new(questions());
        let correct: Vec<usize> = session.questions().iter().map(|q| q.correct_answer).collect();

        // First seven right, next two wrong, last one unanswered.
        for (i, q) in questions().iter().enumerate().take(9) {
            let option = if i < 7 { correct[i] } else { (correct[i] + 1) % 4 };
            assert!(session.answer(q.id, option).is_some());
        }

        assert_eq!(session.calculate_score(), 7);
        assert_eq!(session.calculate_percentage(), 70.0);
        assert_eq!(session.performance(), PerformanceTier::Good);
        assert!(!session.all_answered());
    }

    #[test]
    fn test_percentage_is_ten_per_question() {
        for count in 0..=10 {
            let mut session = QuizSession::new(questions());
            for q in questions().iter().take(count) {
                session.answer(q.id, q.correct_answer);
            }
            assert_eq!(session.calculate_percentage(), count as f64 * 10.0);
        }
    }

    #[test]
    fn test_answer_is_final_once_revealed() {
        let mut session = QuizSession::new(questions());
        assert_eq!(
            session.answer(1, 0),
            Some(AnswerOutcome::Incorrect {
                correct_option: "b".to_string()
            })
        );
        assert!(session.is_revealed(1));
        assert_eq!(session.answer(1, 1), None);
        assert_eq!(session.user_answer(1), Some(0));
    }

    #[test]
    fn test_answer_rejects_unknown_question_and_option() {
        let mut session = QuizSession::new(questions());
        assert_eq!(session.answer(42, 0), None);
        assert_eq!(session.answer(2, 4), None);
        assert_eq!(session.answer(2, 2), Some(AnswerOutcome::Correct));
    }

    #[test]
    fn test_performance_tiers() {
        assert_eq!(PerformanceTier::from_percentage(100.0), PerformanceTier::Perfect);
        assert_eq!(PerformanceTier::from_percentage(90.0), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(80.0), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percentage(60.0), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percentage(40.0), PerformanceTier::NiceTry);
        assert_eq!(PerformanceTier::from_percentage(30.0), PerformanceTier::KeepPracticing);
        assert_eq!(PerformanceTier::from_percentage(0.0), PerformanceTier::KeepPracticing);
    }

    #[test]
    fn test_results_and_analysis() {
        let mut session = QuizSession::new(questions());
        for q in questions() {
            session.answer(q.id, q.correct_answer);
        }
        assert!(session.all_answered());
        session.show_results();
        assert!(session.results_shown());
        assert_eq!(session.performance(), PerformanceTier::Perfect);

        let analysis = session.question_analysis();
        assert_eq!(analysis.len(), 10);
        assert!(analysis.iter().all(|a| a.correct));
        assert_eq!(analysis[0].user_answer.as_deref(), Some("b"));
        assert_eq!(analysis[0].correct_answer, "b");
    }

    #[test]
    fn test_empty_quiz() {
        let session = QuizSession::new(Vec::new());
        assert_eq!(session.calculate_score(), 0);
        assert_eq!(session.calculate_percentage(), 0.0);
        assert!(!session.all_answered());
    }

    #[test]
    fn test_roadmap_progress_rounds() {
        let mut roadmap = RoadmapProgress::new(vec![video("a"), video("b"), video("c")]);
        assert_eq!(roadmap.progress(), 0);

        assert_eq!(roadmap.toggle("a"), Some(true));
        assert_eq!(roadmap.progress(), 33);

        assert_eq!(roadmap.toggle("b"), Some(true));
        assert_eq!(roadmap.progress(), 67);

        assert_eq!(roadmap.toggle("a"), Some(false));
        assert!(!roadmap.is_completed("a"));
        assert_eq!(roadmap.completed_count(), 1);
        assert_eq!(roadmap.progress(), 33);
    }

    #[test]
    fn test_roadmap_ignores_unknown_ids() {
        let mut roadmap = RoadmapProgress::new(vec![video("a")]);
        assert_eq!(roadmap.toggle("zzz"), None);
        assert_eq!(roadmap.completed_count(), 0);
        assert_eq!(RoadmapProgress::new(Vec::new()).progress(), 0);
    }
}
