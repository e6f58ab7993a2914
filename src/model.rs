use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the dashboard. `marks` is always a finite, non-negative number;
/// text input is normalized before a record is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub roll_number: String,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(rename = "grade")]
    pub grade_letter: String,
    pub marks: f64,
}

impl StudentRecord {
    /// Label used by the chart legend, e.g. `Amy (1)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.roll_number)
    }
}

/// Field-wise change set. Absent fields are left alone on update and are
/// reported as missing on create.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(default, alias = "roll", deserialize_with = "text_or_number")]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "class", alias = "className")]
    pub class_name: Option<String>,
    #[serde(default, rename = "grade", alias = "gradeLetter")]
    pub grade_letter: Option<String>,
    #[serde(default)]
    pub marks: Option<serde_json::Value>,
}

/// A record as it arrives from the remote API or a fallback file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentRow {
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: StudentPatch,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

/// Normalizes a marks input (JSON number or numeric text) to `f64`.
pub fn parse_marks(raw: &serde_json::Value) -> Result<f64, ValidationError> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Err(ValidationError::BlankField("marks"));
            }
            t.parse::<f64>().ok()
        }
        serde_json::Value::Null => return Err(ValidationError::MissingField("marks")),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ValidationError::InvalidMarks(raw.to_string())),
    }
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    let Some(v) = value else {
        return Err(ValidationError::MissingField(field));
    };
    present_text(v, field)
}

fn present_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let t = value.trim();
    if t.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(t.to_string())
}

impl StudentPatch {
    /// Builds a full record; every field is required.
    pub fn into_record(self, id: String) -> Result<StudentRecord, ValidationError> {
        let roll_number = required_text(self.roll_number.as_deref(), "rollNumber")?;
        let name = required_text(self.name.as_deref(), "name")?;
        let class_name = required_text(self.class_name.as_deref(), "class")?;
        let grade_letter = required_text(self.grade_letter.as_deref(), "grade")?;
        let marks = match self.marks.as_ref() {
            Some(raw) => parse_marks(raw)?,
            None => return Err(ValidationError::MissingField("marks")),
        };
        Ok(StudentRecord {
            id,
            roll_number,
            name,
            class_name,
            grade_letter,
            marks,
        })
    }

    /// Returns `record` with the present fields replaced. Validation happens
    /// before anything is written, so `record` is untouched on error.
    pub fn applied_to(&self, record: &StudentRecord) -> Result<StudentRecord, ValidationError> {
        let mut next = record.clone();
        if let Some(v) = self.roll_number.as_deref() {
            next.roll_number = present_text(v, "rollNumber")?;
        }
        if let Some(v) = self.name.as_deref() {
            next.name = present_text(v, "name")?;
        }
        if let Some(v) = self.class_name.as_deref() {
            next.class_name = present_text(v, "class")?;
        }
        if let Some(v) = self.grade_letter.as_deref() {
            next.grade_letter = present_text(v, "grade")?;
        }
        if let Some(raw) = self.marks.as_ref() {
            next.marks = parse_marks(raw)?;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_patch() -> StudentPatch {
        serde_json::from_value(json!({
            "roll": 7,
            "name": "  Dana ",
            "class": "10th",
            "grade": "A",
            "marks": "85"
        }))
        .expect("patch")
    }

    #[test]
    fn marks_text_is_normalized_to_number() {
        assert_eq!(parse_marks(&json!("85")), Ok(85.0));
        assert_eq!(parse_marks(&json!(" 72.5 ")), Ok(72.5));
        assert_eq!(parse_marks(&json!(40)), Ok(40.0));
        assert!(matches!(
            parse_marks(&json!("abc")),
            Err(ValidationError::InvalidMarks(_))
        ));
        assert!(matches!(
            parse_marks(&json!("-3")),
            Err(ValidationError::InvalidMarks(_))
        ));
        assert!(matches!(
            parse_marks(&json!("inf")),
            Err(ValidationError::InvalidMarks(_))
        ));
        assert_eq!(
            parse_marks(&json!("  ")),
            Err(ValidationError::BlankField("marks"))
        );
    }

    #[test]
    fn numeric_roll_and_aliases_deserialize() {
        let rec = full_patch().into_record("x".into()).expect("record");
        assert_eq!(rec.roll_number, "7");
        assert_eq!(rec.name, "Dana");
        assert_eq!(rec.class_name, "10th");
        assert_eq!(rec.marks, 85.0);

        let alt: StudentPatch = serde_json::from_value(json!({
            "rollNumber": "R-1",
            "className": "9th",
            "gradeLetter": "B"
        }))
        .expect("alt patch");
        assert_eq!(alt.roll_number.as_deref(), Some("R-1"));
        assert_eq!(alt.class_name.as_deref(), Some("9th"));
        assert_eq!(alt.grade_letter.as_deref(), Some("B"));
    }

    #[test]
    fn create_requires_every_field() {
        let mut p = full_patch();
        p.name = Some("   ".into());
        assert_eq!(
            p.into_record("x".into()),
            Err(ValidationError::BlankField("name"))
        );

        let mut p = full_patch();
        p.marks = None;
        assert_eq!(
            p.into_record("x".into()),
            Err(ValidationError::MissingField("marks"))
        );
    }

    #[test]
    fn partial_patch_keeps_unspecified_fields() {
        let base = full_patch().into_record("x".into()).expect("record");
        let patch = StudentPatch {
            marks: Some(json!("91")),
            ..StudentPatch::default()
        };
        let next = patch.applied_to(&base).expect("apply");
        assert_eq!(next.marks, 91.0);
        assert_eq!(next.name, base.name);
        assert_eq!(next.id, base.id);
    }

    #[test]
    fn row_rejects_structured_roll() {
        let res: Result<StudentRow, _> = serde_json::from_value(json!({ "roll": [1] }));
        assert!(res.is_err());
    }
}
