use std::collections::HashMap;

use tracing::{debug, instrument};

use classrank_core::RecordError;
use classrank_models::{Class, LeaderboardRow, Session, Snapshot, Standing, StudentId};

use crate::modules::classes::ClassService;

pub struct RankingService;

impl RankingService {
    /// Total and dense rank for every student enrolled in a class.
    ///
    /// Only the class's current subjects count towards a total; a missing mark
    /// counts as 0 and an enrolled id with no student record totals 0. An
    /// unknown class yields an empty map.
    #[instrument(skip(snapshot))]
    pub fn compute_totals_and_ranks(
        snapshot: &Snapshot,
        class_id: &str,
    ) -> HashMap<StudentId, Standing> {
        let Some(class) = snapshot.class(class_id) else {
            debug!("Unknown class, nothing to rank");
            return HashMap::new();
        };

        standings(snapshot, class)
            .into_iter()
            .map(|(student_id, standing)| (student_id.clone(), standing))
            .collect()
    }

    /// The class leaderboard, ordered by rank then student id.
    #[instrument(skip(snapshot), fields(session = %session.key()))]
    pub fn leaderboard(
        snapshot: &Snapshot,
        session: &Session,
        class_key: &str,
    ) -> Result<Vec<LeaderboardRow>, RecordError> {
        let (_, class) = ClassService::resolve_class(snapshot, session, class_key)?;

        Ok(standings(snapshot, class)
            .into_iter()
            .map(|(student_id, standing)| {
                let student = snapshot.student(student_id.as_str());
                LeaderboardRow {
                    rank: standing.rank,
                    student_id: student_id.clone(),
                    name: student.map(|s| s.name.clone()).unwrap_or_default(),
                    roll_no: student.map(|s| s.roll_no.clone()).unwrap_or_default(),
                    total: standing.total,
                    marks: class
                        .subjects
                        .iter()
                        .map(|subject| student.map_or(0, |s| s.mark(subject)))
                        .collect(),
                }
            })
            .collect())
    }
}

/// Sum of a student's marks over the class's current subjects.
fn total_for(snapshot: &Snapshot, class: &Class, student_id: &StudentId) -> u64 {
    snapshot
        .student(student_id.as_str())
        .map(|student| {
            class
                .subjects
                .iter()
                .map(|subject| u64::from(student.mark(subject)))
                .sum()
        })
        .unwrap_or(0)
}

/// Students sorted by descending total then ascending id, each with a dense rank.
pub(crate) fn standings<'a>(snapshot: &Snapshot, class: &'a Class) -> Vec<(&'a StudentId, Standing)> {
    let mut totals: Vec<(&StudentId, u64)> = class
        .students
        .iter()
        .map(|student_id| (student_id, total_for(snapshot, class, student_id)))
        .collect();
    totals.sort_by(|(a_id, a_total), (b_id, b_total)| {
        b_total.cmp(a_total).then_with(|| a_id.cmp(b_id))
    });
    totals.dedup_by(|(a_id, _), (b_id, _)| a_id == b_id);

    let mut rank = 0u32;
    let mut previous: Option<u64> = None;
    totals
        .into_iter()
        .map(|(student_id, total)| {
            if previous != Some(total) {
                rank += 1;
                previous = Some(total);
            }
            (student_id, Standing { total, rank })
        })
        .collect()
}
