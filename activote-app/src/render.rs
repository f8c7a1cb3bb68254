//! Plain-text rendering of the page components for the terminal.

use std::fmt::Write;

use activote_common::models::block::{abbreviate, display_value};

use crate::{
    components::{
        charts::{CandidateVotesChart, VoteDistribution},
        BlockDetail, BlockchainViewer, CandidateRow, Linkage, StatisticsCard, UserVoteStatus,
    },
    pages::dashboard::DashboardData,
};

const BAR_WIDTH: usize = 30;

fn bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn statistics(card: &StatisticsCard) -> String {
    format!(
        "Turnout {} {}% ({} of {} voters)",
        bar(card.progress(), BAR_WIDTH),
        card.percentage_voted,
        card.voted_voters,
        card.total_voters
    )
}

pub fn candidates(rows: &[CandidateRow]) -> String {
    if rows.is_empty() {
        return "No candidates registered.".to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:<24} {:>5} votes {:>5}% {}{}",
            row.id,
            row.name,
            row.party,
            row.vote_count,
            row.share,
            bar(row.ratio, 20),
            if row.leading { "  * leading" } else { "" }
        );
    }
    out
}

pub fn distribution(chart: &VoteDistribution) -> String {
    match chart {
        VoteDistribution::NoVotes => "No votes yet.".to_string(),
        VoteDistribution::Slices(slices) => {
            let mut out = String::new();
            for slice in slices {
                let _ = writeln!(
                    out,
                    "{:<24} {} {:>5} ({})",
                    slice.name,
                    bar(slice.ratio, BAR_WIDTH),
                    slice.value,
                    slice.color
                );
            }
            out
        }
    }
}

pub fn votes_chart(chart: &CandidateVotesChart) -> String {
    match chart {
        CandidateVotesChart::NoData => "No candidate data.".to_string(),
        CandidateVotesChart::Series(points) => {
            let mut out = String::new();
            for point in points {
                let delta = point.current.saturating_sub(point.previous);
                let _ = write!(out, "{:<24} current {:>5}  previous {:>5}", point.name, point.current, point.previous);
                if delta > 0 {
                    let _ = write!(out, "  (+{})", delta);
                }
                out.push('\n');
            }
            out
        }
    }
}

pub fn ledger(viewer: &BlockchainViewer) -> String {
    let mut out = String::new();
    for block in viewer.visible() {
        let _ = writeln!(
            out,
            "#{:<5} {}  <- {}",
            block.id,
            block.short_hash(),
            abbreviate(&block.previous_hash)
        );
    }
    let _ = write!(out, "{}", viewer.caption());
    if viewer.can_prev() || viewer.can_next() {
        let _ = write!(
            out,
            "  [{}|{}]",
            if viewer.can_prev() { "prev" } else { "    " },
            if viewer.can_next() { "next" } else { "    " }
        );
    }
    out
}

pub fn block_detail(detail: &BlockDetail<'_>) -> String {
    let block = detail.block;
    let mut out = String::new();
    let _ = writeln!(out, "Block #{}", block.id);
    let _ = writeln!(out, "  Hash:          {}", block.hash);
    let _ = writeln!(out, "  Previous hash: {}", block.previous_hash);
    let _ = writeln!(out, "  Timestamp:     {}", detail.timestamp);
    if let Some(data) = &block.data {
        let _ = writeln!(out, "  Data:          {}", display_value(data));
    }
    if let Some(nonce) = &block.nonce {
        let _ = writeln!(out, "  Nonce:         {}", display_value(nonce));
    }
    if let Some(difficulty) = &block.difficulty {
        let _ = writeln!(out, "  Difficulty:    {}", display_value(difficulty));
    }
    let linkage = match detail.linkage {
        Linkage::Genesis => "first block in list",
        Linkage::Linked => "matches previous block",
        Linkage::Broken => "does not match previous block",
    };
    let _ = write!(out, "  Link:          {}", linkage);
    out
}

pub fn vote_status(status: &UserVoteStatus) -> String {
    match status {
        UserVoteStatus::Ready { username, has_voted, image } => format!(
            "{} ({})\n{}",
            username,
            image,
            if *has_voted { "You have already voted." } else { "You have not voted yet." }
        ),
        UserVoteStatus::Failed(message) => message.clone(),
    }
}

pub fn dashboard(data: &DashboardData, viewer: &BlockchainViewer) -> String {
    let mut out = String::new();
    let stats = &data.statistics;
    if !stats.username.is_empty() {
        let _ = writeln!(out, "Welcome, {}", stats.username);
    }
    let _ = writeln!(out, "{}", statistics(&data.statistics_card()));
    let _ = writeln!(
        out,
        "{}\n",
        if data.has_voted() { "Your vote has been recorded." } else { "You have not voted yet." }
    );
    let _ = writeln!(out, "Candidates\n{}", candidates(&data.rows()));
    let _ = writeln!(out, "Vote distribution\n{}", distribution(&data.distribution()));
    let _ = writeln!(out, "Votes per candidate\n{}", votes_chart(&data.votes_chart()));
    let _ = write!(out, "Ledger\n{}", ledger(viewer));
    out
}

#[cfg(test)]
mod tests {
    use activote_common::{Block, BlockTimestamp};

    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0, 4), "[....]");
        assert_eq!(bar(0.5, 4), "[##..]");
        assert_eq!(bar(3.0, 4), "[####]");
    }

    #[test]
    fn test_no_votes_placeholder() {
        assert_eq!(distribution(&VoteDistribution::NoVotes), "No votes yet.");
        assert_eq!(votes_chart(&CandidateVotesChart::NoData), "No candidate data.");
    }

    #[test]
    fn test_ledger_and_detail() {
        let blocks: Vec<Block> = (1..=9)
            .map(|id| Block {
                id,
                hash: format!("{:064x}", id),
                previous_hash: if id == 1 { "0".into() } else { format!("{:064x}", id - 1) },
                timestamp: Some(BlockTimestamp::Millis(0)),
                data: None,
                nonce: Some(id.into()),
                difficulty: None,
            })
            .collect();
        let mut viewer = BlockchainViewer::new(blocks);
        let text = ledger(&viewer);
        assert!(text.contains("Showing blocks 1 - 7 of 9"));
        assert!(text.contains("#1 "));
        assert!(!text.contains("#8 "));
        assert!(text.ends_with("[    |next]"));

        let detail = viewer.select(2).unwrap();
        let text = block_detail(&detail);
        assert!(text.contains("Timestamp:     Invalid Date"));
        assert!(text.contains("Nonce:         2"));
        assert!(text.ends_with("matches previous block"));
    }

    #[test]
    fn test_detail_renders_object_payload() {
        let blocks: Vec<Block> = serde_json::from_str(
            r#"[{"id": 1, "hash": "h1", "previousHash": "0", "timestamp": 1700000000000.5,
                 "data": {"candidateId": 2}, "difficulty": 3}]"#,
        )
        .unwrap();
        let mut viewer = BlockchainViewer::new(blocks);
        let text = block_detail(&viewer.select(1).unwrap());
        assert!(text.contains("Timestamp:     2023-11-14 22:13:20"));
        assert!(text.contains("Data:          {\n  \"candidateId\": 2\n}"));
        assert!(text.contains("Difficulty:    3"));
    }
}
