use crate::model::StudentRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[serde(alias = "rollNumber")]
    Roll,
    Name,
    #[serde(alias = "className")]
    Class,
    #[serde(alias = "gradeLetter")]
    Grade,
    Marks,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "roll" | "rollnumber" => Some(SortKey::Roll),
            "name" => Some(SortKey::Name),
            "class" | "classname" => Some(SortKey::Class),
            "grade" | "gradeletter" => Some(SortKey::Grade),
            "marks" => Some(SortKey::Marks),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Column and direction the table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Header-click transition: the current key flips direction, any other key
    /// starts ascending.
    pub fn clicked(current: Option<SortState>, key: SortKey) -> SortState {
        match current {
            Some(s) if s.key == key => SortState {
                key,
                direction: s.direction.flipped(),
            },
            _ => SortState {
                key,
                direction: SortDirection::Asc,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
}

fn sort_value(record: &StudentRecord, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Marks => SortValue::Number(record.marks),
        SortKey::Roll => match record.roll_number.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => SortValue::Number(v),
            _ => SortValue::Text(&record.roll_number),
        },
        SortKey::Name => SortValue::Text(&record.name),
        SortKey::Class => SortValue::Text(&record.class_name),
        SortKey::Grade => SortValue::Text(&record.grade_letter),
    }
}

fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(&y),
        (SortValue::Text(x), SortValue::Text(y)) => compare_text(x, y),
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
    }
}

// Case-folded first so "amy" and "Amy" sit together, raw text breaks the tie.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare(a: &StudentRecord, b: &StudentRecord, key: SortKey) -> Ordering {
    compare_values(sort_value(a, key), sort_value(b, key))
}

/// Stable sort into a new vector; equal keys keep their input order in both
/// directions.
pub fn sort(
    records: &[StudentRecord],
    key: SortKey,
    direction: SortDirection,
) -> Vec<StudentRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

/// Applies an optional sort state; `None` keeps input order.
pub fn apply(records: &[StudentRecord], state: Option<SortState>) -> Vec<StudentRecord> {
    match state {
        Some(s) => sort(records, s.key, s.direction),
        None => records.to_vec(),
    }
}
