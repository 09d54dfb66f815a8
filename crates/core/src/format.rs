use std::sync::LazyLock;

use regex::Regex;

use crate::{
    session::RoadmapProgress,
    types::{QuizQuestion, SummaryContent},
};

static ISO_DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT(\d+H)?(\d+M)?(\d+S)?").expect("valid regex"));

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Convert an ISO 8601 duration (`PT1H2M3S`) into `H:MM:SS` or `MM:SS`.
///
/// Anything without a `PT` designator renders as `00:00`.
pub fn format_duration(duration: &str) -> String {
    let Some(captures) = ISO_DURATION_RE.captures(duration) else {
        return "00:00".to_string();
    };

    let part = |i: usize, unit: char| {
        captures
            .get(i)
            .map(|m| m.as_str().trim_end_matches(unit))
            .unwrap_or("")
    };
    let hours = part(1, 'H');
    let minutes = part(2, 'M');
    let seconds = part(3, 'S');

    let mut output = String::new();
    if !hours.is_empty() {
        output.push_str(&format!("{}:", hours));
    }
    output.push_str(&format!("{:0>2}:{:0>2}", minutes, seconds));
    output
}

/// Format a summary as human-readable markdown
pub fn format_summary_readable(summary: &SummaryContent) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", summary.title));

    for (i, point) in summary.points.iter().enumerate() {
        output.push_str(&format!("## {}. {}\n\n", i + 1, point.heading));
        output.push_str(point.description.trim());
        output.push_str("\n\n");

        if !point.resources.is_empty() {
            output.push_str("**Resources:**\n\n");
            for resource in &point.resources {
                output.push_str(&format!(
                    "• [{}] {} — {}\n",
                    resource.kind.label(),
                    resource.title,
                    resource.url
                ));
            }
            output.push('\n');
        }
    }

    output
}

/// Script read aloud by a speech synthesizer.
pub fn narration_text(summary: &SummaryContent) -> String {
    let points = summary
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| format!("Point {}: {}. {}", i + 1, point.heading, point.description))
        .collect::<Vec<_>>()
        .join(". ");

    format!("{}. {}", summary.title, points)
}

/// Format one quiz question with lettered options
pub fn format_question(number: usize, question: &QuizQuestion) -> String {
    let mut output = format!("{}. {}\n", number, question.text);
    for (i, option) in question.options.iter().enumerate() {
        output.push_str(&format!("   {}) {}\n", option_label(i), option));
    }
    output
}

/// `0 -> 'A'`, `1 -> 'B'`, ...
pub fn option_label(index: usize) -> char {
    (b'A' + index as u8) as char
}

pub fn format_roadmap_readable(roadmap: &RoadmapProgress) -> String {
    let mut output = String::new();

    for (i, video) in roadmap.videos().iter().enumerate() {
        let mark = if roadmap.is_completed(&video.id) { "[x]" } else { "[ ]" };
        output.push_str(&format!(
            "{} {:>2}. {} ({})\n",
            mark,
            i + 1,
            video.title,
            video.duration
        ));
    }

    output.push_str(&format!(
        "\nProgress: {}% ({} of {} videos)\n",
        roadmap.progress(),
        roadmap.completed_count(),
        roadmap.videos().len()
    ));
    output
}
