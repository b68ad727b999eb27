use tracing::instrument;

use classrank_core::RecordError;
use classrank_models::{Session, Snapshot};

use crate::modules::classes::ClassService;
use crate::modules::ranking::service::standings;

pub const EXPORT_FIXED_COLUMNS: [&str; 4] = ["rank", "student_id", "student_name", "total"];

/// A class leaderboard flattened into rows of text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Render as CSV with `\n` line endings and a trailing newline.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for record in std::iter::once(&self.header).chain(self.rows.iter()) {
            let line: Vec<String> = record.iter().map(|cell| csv_quote(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub struct ExportService;

impl ExportService {
    /// Build the export table for one of the session's classes.
    ///
    /// Columns are the fixed ones followed by the class subjects in order.
    /// Rows follow rank, ties by student id.
    #[instrument(skip(snapshot), fields(session = %session.key()))]
    pub fn export_class(
        snapshot: &Snapshot,
        session: &Session,
        class_key: &str,
    ) -> Result<ExportTable, RecordError> {
        let (_, class) = ClassService::resolve_class(snapshot, session, class_key)?;

        let header = EXPORT_FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(class.subjects.iter().cloned())
            .collect();

        let rows = standings(snapshot, class)
            .into_iter()
            .map(|(student_id, standing)| {
                let student = snapshot.student(student_id.as_str());
                let mut row = vec![
                    standing.rank.to_string(),
                    student_id.to_string(),
                    student.map(|s| s.name.clone()).unwrap_or_default(),
                    standing.total.to_string(),
                ];
                row.extend(
                    class
                        .subjects
                        .iter()
                        .map(|subject| student.map_or(0, |s| s.mark(subject)).to_string()),
                );
                row
            })
            .collect();

        Ok(ExportTable { header, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_quote() {
        assert_eq!(csv_quote("plain"), "plain");
        assert_eq!(csv_quote("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(csv_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_to_csv_layout() {
        let table = ExportTable {
            header: vec!["rank".into(), "student_id".into()],
            rows: vec![vec!["1".into(), "STU_1_AAAA".into()]],
        };
        assert_eq!(table.to_csv(), "rank,student_id\n1,STU_1_AAAA\n");
    }
}
