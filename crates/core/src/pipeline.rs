use tracing::info;

use crate::{
    error::{EduError, Result},
    generator::ContentGenerator,
    resolver::{require_playlist_id, require_video_id},
    types::{PlaylistItem, QuizQuestion, SummaryContent, VideoMetadata},
    youtube::YoutubeClient,
};

/// Generated summary together with the video it was built from.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub video_id: String,
    pub video: VideoMetadata,
    pub summary: SummaryContent,
}

#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub video_id: String,
    pub video: VideoMetadata,
    pub questions: Vec<QuizQuestion>,
}

/// URL to study material: resolve, fetch metadata, generate, validate.
///
/// URLs are resolved before any request is made.
pub struct Pipeline {
    youtube: YoutubeClient,
    generator: Option<ContentGenerator>,
}

impl Pipeline {
    pub fn new(youtube: YoutubeClient, generator: ContentGenerator) -> Self {
        Self {
            youtube,
            generator: Some(generator),
        }
    }

    /// A pipeline that only talks to YouTube (roadmaps).
    pub fn youtube_only(youtube: YoutubeClient) -> Self {
        Self {
            youtube,
            generator: None,
        }
    }

    pub async fn summary_for_url(&self, url: &str) -> Result<SummaryOutcome> {
        let video_id = require_video_id(url)?;
        let generator = self.generator()?;
        let video = self.youtube.video_metadata(&video_id).await?;
        let summary = generator.generate_summary(&video).await?;
        info!(%video_id, points = summary.points.len(), "summary generated");

        Ok(SummaryOutcome {
            video_id,
            video,
            summary,
        })
    }

    pub async fn quiz_for_url(&self, url: &str) -> Result<QuizOutcome> {
        let video_id = require_video_id(url)?;
        let generator = self.generator()?;
        let video = self.youtube.video_metadata(&video_id).await?;
        let questions = generator.generate_quiz(&video).await?;
        info!(%video_id, questions = questions.len(), "quiz generated");

        Ok(QuizOutcome {
            video_id,
            video,
            questions,
        })
    }

    pub async fn roadmap_for_url(&self, url: &str) -> Result<Vec<PlaylistItem>> {
        let playlist_id = require_playlist_id(url)?;
        self.youtube.playlist_items(&playlist_id).await
    }

    fn generator(&self) -> Result<&ContentGenerator> {
        self.generator
            .as_ref()
            .ok_or_else(|| EduError::Config {
                reason: "no model configured for content generation".to_string(),
            })
    }
}
