//! Ranking results and leaderboard rows.

use serde::Serialize;

use crate::ids::StudentId;

/// A student's total over the class's current subjects and their dense rank.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub total: u64,
    pub rank: u32,
}

/// One leaderboard line, ordered by rank then student id.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub student_id: StudentId,
    pub name: String,
    pub roll_no: String,
    pub total: u64,
    /// Per-subject marks in class subject order, 0 when unset.
    pub marks: Vec<u32>,
}
