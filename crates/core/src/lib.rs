//! eduai Core Library
//!
//! Turns YouTube videos and playlists into study material: AI-generated
//! summaries and quizzes, validated against a strict shape, and playlist
//! roadmaps with progress tracking.

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod timer;
pub mod types;
pub mod validate;
pub mod youtube;

// Re-export commonly used items at crate root
pub use config::{ModelSettings, YoutubeSettings, load_dotenv};
pub use error::{EduError, QuestionDefect, Result};
pub use format::{
    format_duration, format_question, format_roadmap_readable, format_summary_readable,
    format_timestamp, narration_text, option_label,
};
pub use generator::ContentGenerator;
pub use pipeline::{Pipeline, QuizOutcome, SummaryOutcome};
pub use provider::{Provider, ProviderConfig};
pub use resolver::{extract_playlist_id, extract_video_id, watch_url};
pub use session::{
    AnswerOutcome, PerformanceTier, QuestionAnalysis, QuizSession, RoadmapProgress,
};
pub use timer::FocusTimer;
pub use types::{
    PlaylistItem, QuizQuestion, Resource, ResourceKind, SummaryContent, SummaryPoint,
    VideoMetadata,
};
pub use validate::{parse_quiz_response, parse_summary_response};
pub use youtube::YoutubeClient;
