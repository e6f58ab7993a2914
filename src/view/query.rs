use crate::model::StudentRecord;

/// Case-insensitive substring search over name, class and roll number.
/// A blank term returns the input unchanged.
pub fn filter(records: &[StudentRecord], term: &str) -> Vec<StudentRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| matches(r, &needle))
        .cloned()
        .collect()
}

fn matches(record: &StudentRecord, needle: &str) -> bool {
    [&record.name, &record.class_name, &record.roll_number]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(roll: &str, name: &str, class: &str) -> StudentRecord {
        StudentRecord {
            id: format!("id-{roll}"),
            roll_number: roll.into(),
            name: name.into(),
            class_name: class.into(),
            grade_letter: "A".into(),
            marks: 50.0,
        }
    }

    fn sample() -> Vec<StudentRecord> {
        vec![
            rec("1", "Amy", "10th"),
            rec("2", "Bob", "9th"),
            rec("31", "Sam", "Grade 10"),
            rec("4", "Kim", "8th"),
        ]
    }

    #[test]
    fn empty_term_is_identity() {
        let rs = sample();
        assert_eq!(filter(&rs, ""), rs);
        assert_eq!(filter(&rs, "   "), rs);
    }

    #[test]
    fn matches_any_searched_field_ignoring_case() {
        let rs = sample();
        let names: Vec<_> = filter(&rs, "AM").into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Amy", "Sam"]);

        let by_class: Vec<_> = filter(&rs, "10").into_iter().map(|r| r.name).collect();
        assert_eq!(by_class, vec!["Amy", "Sam"]);

        let by_roll: Vec<_> = filter(&rs, "31").into_iter().map(|r| r.name).collect();
        assert_eq!(by_roll, vec!["Sam"]);
    }

    #[test]
    fn every_hit_contains_the_term_and_filter_is_idempotent() {
        let rs = sample();
        for term in ["a", "th", "9", "zzz", "GRADE"] {
            let once = filter(&rs, term);
            let t = term.to_lowercase();
            assert!(once.iter().all(|r| {
                r.name.to_lowercase().contains(&t)
                    || r.class_name.to_lowercase().contains(&t)
                    || r.roll_number.to_lowercase().contains(&t)
            }));
            assert_eq!(filter(&once, term), once);
        }
    }
}
