use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// The six KinderTales requirement categories, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistField {
    Pictures,
    DailyBlurb,
    DailyUpdates,
    Curriculum,
    NameToFace,
    Portfolio,
}

impl ChecklistField {
    pub const ALL: [ChecklistField; 6] = [
        ChecklistField::Pictures,
        ChecklistField::DailyBlurb,
        ChecklistField::DailyUpdates,
        ChecklistField::Curriculum,
        ChecklistField::NameToFace,
        ChecklistField::Portfolio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChecklistField::Pictures => "Pictures (3)",
            ChecklistField::DailyBlurb => "Daily Blurb",
            ChecklistField::DailyUpdates => "Daily Updates",
            ChecklistField::Curriculum => "Curriculum",
            ChecklistField::NameToFace => "Name to Face",
            ChecklistField::Portfolio => "Portfolio",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ChecklistField::Pictures => "pictures",
            ChecklistField::DailyBlurb => "dailyBlurb",
            ChecklistField::DailyUpdates => "dailyUpdates",
            ChecklistField::Curriculum => "curriculum",
            ChecklistField::NameToFace => "nameToFace",
            ChecklistField::Portfolio => "portfolio",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ChecklistField {
    type Err = AuditError;

    /// Accepts either the wire key or the column label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ChecklistField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(needle) || f.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| AuditError::UnknownField(s.to_string()))
    }
}

/// Header row shared by both exports and `session.get`.
pub fn column_labels() -> [&'static str; 7] {
    let mut cols = ["Child"; 7];
    for (i, f) in ChecklistField::ALL.iter().enumerate() {
        cols[i + 1] = f.label();
    }
    cols
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldValue {
    Yes,
    No,
}

impl FieldValue {
    pub fn label(self) -> &'static str {
        match self {
            FieldValue::Yes => "Yes",
            FieldValue::No => "No",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldValue {
    type Err = AuditError;

    // Exact match only: the selector only ever offers these two strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(FieldValue::Yes),
            "No" => Ok(FieldValue::No),
            other => Err(AuditError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("value must be \"Yes\" or \"No\", got {0:?}")]
    InvalidValue(String),

    #[error("unknown checklist field: {0:?}")]
    UnknownField(String),

    #[error("child not found: {0}")]
    ChildNotFound(String),
}

impl AuditError {
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::InvalidValue(_) => "bad_value",
            AuditError::UnknownField(_) => "bad_field",
            AuditError::ChildNotFound(_) => "not_found",
        }
    }
}

/// One child's audit row. Cells are indexed by `ChecklistField`, so the set of
/// fields and their order can never drift. `None` is an unset cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub id: String,
    name: String,
    cells: [Option<FieldValue>; 6],
}

impl ChildRecord {
    fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            cells: [Some(FieldValue::No); 6],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(dead_code)]
    pub fn get(&self, field: ChecklistField) -> Option<FieldValue> {
        self.cells[field.index()]
    }

    /// Cells in column order, paired with their field.
    pub fn cells(&self) -> impl Iterator<Item = (ChecklistField, Option<FieldValue>)> + '_ {
        ChecklistField::ALL.into_iter().zip(self.cells.iter().copied())
    }

    /// Overwrites one cell. Anything other than "Yes"/"No" is refused and the
    /// prior value is kept.
    pub fn set_field(&mut self, field: ChecklistField, value: &str) -> Result<(), AuditError> {
        let parsed: FieldValue = value.parse()?;
        self.cells[field.index()] = Some(parsed);
        Ok(())
    }

    /// Rendered row: name followed by each cell's label, unset cells empty.
    pub fn row(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(7);
        out.push(self.name.clone());
        out.extend(
            self.cells
                .iter()
                .map(|c| c.map(|v| v.label().to_string()).unwrap_or_default()),
        );
        out
    }

    #[cfg(test)]
    pub(crate) fn clear_field(&mut self, field: ChecklistField) {
        self.cells[field.index()] = None;
    }
}

/// State for one audit run. Owned by `main` and handed to whatever needs it.
#[derive(Debug, Default)]
pub struct AuditSession {
    audit_date: String,
    teacher_name: String,
    records: Vec<ChildRecord>,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audit_date(&self) -> &str {
        &self.audit_date
    }

    pub fn teacher_name(&self) -> &str {
        &self.teacher_name
    }

    pub fn set_audit_date(&mut self, v: &str) {
        self.audit_date = v.trim().to_string();
    }

    pub fn set_teacher_name(&mut self, v: &str) {
        self.teacher_name = v.trim().to_string();
    }

    pub fn records(&self) -> &[ChildRecord] {
        &self.records
    }

    /// Appends a child with every field defaulted to `No`. A blank name is
    /// ignored and `None` comes back.
    pub fn add_child(&mut self, name: &str) -> Option<&ChildRecord> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.records.push(ChildRecord::new(name.to_string()));
        self.records.last()
    }

    #[allow(dead_code)]
    pub fn child(&self, id: &str) -> Option<&ChildRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn set_field(
        &mut self,
        child_id: &str,
        field: ChecklistField,
        value: &str,
    ) -> Result<&ChildRecord, AuditError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == child_id)
            .ok_or_else(|| AuditError::ChildNotFound(child_id.to_string()))?;
        record.set_field(field, value)?;
        Ok(record)
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut [ChildRecord] {
        &mut self.records
    }
}
