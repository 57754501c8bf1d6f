//! Plain-text rendering of a leaderboard payload.

use engrank_leaderboard::{LeaderboardEntry, LeaderboardResponse};

pub(crate) fn entry_line(entry: &LeaderboardEntry) -> String {
    format!(
        "{}. {} - Score: {} ({}R, {}C, {}S)",
        entry.rank,
        entry.name.as_deref().unwrap_or("(unknown)"),
        entry.total_score,
        entry.reactions,
        entry.comments,
        entry.reposts
    )
}

/// Summary, ranked people and isolated errors, one output line per element.
pub(crate) fn leaderboard_lines(response: &LeaderboardResponse) -> Vec<String> {
    let board = &response.data.leaderboard;
    let metadata = &response.data.metadata;

    let mut lines = vec![
        format!("Found {} people in leaderboard", board.len()),
        format!("Analyzed {} posts", metadata.posts_analyzed),
        format!(
            "Total engagement: {}",
            metadata.aggregates.total_engagement
        ),
    ];
    if let Some(message) = &metadata.message {
        lines.push(message.clone());
    }

    if !board.is_empty() {
        lines.push(String::new());
        lines.push("All People:".to_owned());
        lines.extend(board.iter().map(entry_line));
    }

    if let Some(errors) = metadata.errors.as_deref().filter(|e| !e.is_empty()) {
        lines.push(String::new());
        lines.push("Errors encountered:".to_owned());
        lines.extend(errors.iter().map(|e| format!("- {e}")));
    }

    lines
}

pub(crate) fn print_leaderboard(response: &LeaderboardResponse) {
    for line in leaderboard_lines(response) {
        println!("{line}");
    }
}
