//! Flat-text rendering of the conversation log and resume summary for
//! download.

use crate::extraction::sections::{ResumeSummary, NO_STRUCTURE_MESSAGE};
use crate::interview::session::ConversationTurn;

/// Renders the conversation log as one `Speaker: text` line per turn.
pub fn format_conversation(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker.name(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a resume summary as `Section:` blocks in canonical order.
///
/// A `NotFound` summary renders the advisory message shown to candidates, so
/// a downloaded transcript records that extraction found nothing.
pub fn format_summary(summary: &ResumeSummary) -> String {
    match summary {
        ResumeSummary::Found { sections } => {
            let mut out = String::new();
            for (section, content) in sections {
                out.push_str(&format!("{}:\n{}\n\n", section.name(), content));
            }
            out
        }
        ResumeSummary::NotFound => NO_STRUCTURE_MESSAGE.to_string(),
    }
}

/// Combined download document: the transcript, followed by the resume summary
/// block when one exists.
pub fn format_transcript(turns: &[ConversationTurn], summary: Option<&ResumeSummary>) -> String {
    let mut out = format_conversation(turns);
    if let Some(summary) = summary {
        out.push_str("\n\nResume Summary:\n");
        out.push_str(&format_summary(summary));
    }
    out
}
