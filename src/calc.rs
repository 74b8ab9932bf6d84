use crate::audit::{ChildRecord, FieldValue};
use serde::Serialize;

/// Two-decimal rounding used for the displayed grade.
pub fn round_off_2_decimals(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub grade: f64,
    pub yes_count: usize,
    pub total_cells: usize,
}

impl Grade {
    pub fn display(&self) -> String {
        format!("Grade: {:.2}%", self.grade)
    }
}

/// Flat aggregation over every Yes/No cell of every record. Unset cells count
/// toward neither side. With no cells the grade is 0.
pub fn compute_grade(records: &[ChildRecord]) -> Grade {
    let mut yes_count: usize = 0;
    let mut total_cells: usize = 0;

    for r in records {
        for (field, value) in r.cells() {
            tracing::debug!(child = r.name(), field = field.label(), ?value, "grade cell");
            match value {
                Some(FieldValue::Yes) => {
                    yes_count += 1;
                    total_cells += 1;
                }
                Some(FieldValue::No) => {
                    total_cells += 1;
                }
                None => {}
            }
        }
    }
    tracing::debug!(yes_count, total_cells, "grade tally");

    let grade = if total_cells > 0 {
        100.0 * (yes_count as f64) / (total_cells as f64)
    } else {
        0.0
    };

    Grade {
        grade,
        yes_count,
        total_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditSession, ChecklistField};

    fn session_with(rows: &[&[&str]]) -> AuditSession {
        let mut s = AuditSession::new();
        for (i, cells) in rows.iter().enumerate() {
            let id = s.add_child(&format!("Child {}", i + 1)).expect("add").id.clone();
            for (f, v) in ChecklistField::ALL.iter().zip(cells.iter()) {
                s.set_field(&id, *f, v).expect("set");
            }
        }
        s
    }

    #[test]
    fn empty_table_grades_zero() {
        let g = compute_grade(&[]);
        assert_eq!(g.grade, 0.0);
        assert_eq!(g.total_cells, 0);
        assert_eq!(g.display(), "Grade: 0.00%");
    }

    #[test]
    fn one_third_rounds_to_33_33() {
        let s = session_with(&[&["Yes", "Yes", "No", "No", "No", "No"]]);
        let g = compute_grade(s.records());
        assert_eq!(g.yes_count, 2);
        assert_eq!(g.total_cells, 6);
        assert_eq!(round_off_2_decimals(g.grade), 33.33);
        assert_eq!(g.display(), "Grade: 33.33%");
    }

    #[test]
    fn full_and_empty_rows_average_to_fifty() {
        let s = session_with(&[&["Yes"; 6], &["No"; 6]]);
        let g = compute_grade(s.records());
        assert_eq!(g.yes_count, 6);
        assert_eq!(g.total_cells, 12);
        assert_eq!(g.display(), "Grade: 50.00%");
    }

    #[test]
    fn aggregation_is_flat_over_cells() {
        let s = session_with(&[
            &["Yes"; 6],
            &["Yes", "No", "No", "No", "No", "No"],
        ]);
        let g = compute_grade(s.records());
        assert_eq!((g.yes_count, g.total_cells), (7, 12));
        assert_eq!(round_off_2_decimals(g.grade), 58.33);
    }

    #[test]
    fn unset_cells_are_excluded_from_the_denominator() {
        let mut s = session_with(&[&["Yes", "No", "No", "No", "No", "No"]]);
        for f in [
            ChecklistField::DailyUpdates,
            ChecklistField::Curriculum,
            ChecklistField::NameToFace,
            ChecklistField::Portfolio,
        ] {
            s.records_mut()[0].clear_field(f);
        }
        let g = compute_grade(s.records());
        assert_eq!((g.yes_count, g.total_cells), (1, 2));
        assert_eq!(g.grade, 50.0);
    }

    #[test]
    fn all_unset_grades_zero() {
        let mut s = session_with(&[&["No"; 6]]);
        for f in ChecklistField::ALL {
            s.records_mut()[0].clear_field(f);
        }
        assert_eq!(compute_grade(s.records()).grade, 0.0);
    }

    #[test]
    fn round_off_two_decimals() {
        assert_eq!(round_off_2_decimals(66.666_666), 66.67);
        assert_eq!(round_off_2_decimals(0.0), 0.0);
        assert_eq!(round_off_2_decimals(100.0), 100.0);
    }
}
