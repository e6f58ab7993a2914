use crate::model::StudentRecord;
use serde::Serialize;

/// Slice colors, cycled in record order.
pub const PALETTE: [&str; 7] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#AA336A", "#33AA77", "#FF4444",
];

pub const EMPTY_MESSAGE: &str = "No records yet. Add some students!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Fraction of the total, 0 when every record has 0 marks.
    pub share: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarksChart {
    Placeholder { message: &'static str },
    Pie { total: f64, slices: Vec<PieSlice> },
}

/// Pie data over the whole store, never a single page.
pub fn marks_chart(records: &[StudentRecord]) -> MarksChart {
    if records.is_empty() {
        return MarksChart::Placeholder {
            message: EMPTY_MESSAGE,
        };
    }
    let total: f64 = records.iter().map(|r| r.marks).sum();
    let slices = records
        .iter()
        .enumerate()
        .map(|(i, r)| PieSlice {
            id: r.id.clone(),
            label: r.display_label(),
            value: r.marks,
            share: if total > 0.0 { r.marks / total } else { 0.0 },
            color: PALETTE[i % PALETTE.len()],
        })
        .collect();
    MarksChart::Pie { total, slices }
}
