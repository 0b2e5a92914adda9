use crate::models::grade::GradeRecord;

/// Lenient numeric test for the last token of a line: plain integers,
/// decimals, signs and exponent notation all count. A literal "NaN"
/// does not, so it reads as text.
fn is_numeric_token(token: &str) -> bool {
    token
        .parse::<f64>()
        .map(|value| !value.is_nan())
        .unwrap_or(false)
}

/// Reconstructs a subject/grade table from free OCR text.
///
/// Scans line by line. A line whose last token is not numeric opens a new
/// subject (the whole trimmed line); a line whose last token is numeric
/// adds a grade to the open subject, with all preceding tokens joined into
/// the column label. Lines with fewer than two tokens carry no signal and
/// are skipped, as are grade lines seen before any subject.
///
/// Pure function: no state survives between calls.
pub fn parse_grade_table(text: &str) -> Vec<GradeRecord> {
    let mut records = Vec::new();
    let mut current: Option<GradeRecord> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }

        let last = tokens[tokens.len() - 1];
        if is_numeric_token(last) {
            // A grade line before any subject has nothing to attach to.
            if let Some(record) = current.as_mut() {
                let label = tokens[..tokens.len() - 1].join(" ");
                record.set_grade(&label, last);
            }
        } else {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(GradeRecord::new(line));
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades_of(record: &GradeRecord) -> Vec<(&str, &str)> {
        record
            .grades
            .iter()
            .map(|c| (c.label.as_str(), c.value.as_str()))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_grade_table("").is_empty());
        assert!(parse_grade_table("\n\n   \n\t\n").is_empty());
    }

    #[test]
    fn parses_subjects_in_encounter_order() {
        let text = "Applied Mathematics I\n\
                    Midterm 1 7.5\n\
                    Midterm 2 8\n\
                    General Physics\n\
                    Midterm 1 6.25\n";
        let records = parse_grade_table(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "Applied Mathematics I");
        assert_eq!(
            grades_of(&records[0]),
            vec![("Midterm 1", "7.5"), ("Midterm 2", "8")]
        );
        assert_eq!(records[1].subject, "General Physics");
        assert_eq!(grades_of(&records[1]), vec![("Midterm 1", "6.25")]);
    }

    #[test]
    fn grade_columns_keep_first_seen_order() {
        let text = "Chemistry Lab\nFinal 9\nHomework 7\nAttendance 10\n";
        let records = parse_grade_table(text);

        assert_eq!(
            grades_of(&records[0]),
            vec![("Final", "9"), ("Homework", "7"), ("Attendance", "10")]
        );
    }

    #[test]
    fn duplicate_label_overwrites_in_place() {
        let text = "Modern History\nMidterm 4\nFinal 6\nMidterm 8\n";
        let records = parse_grade_table(text);

        assert_eq!(
            grades_of(&records[0]),
            vec![("Midterm", "8"), ("Final", "6")]
        );
    }

    #[test]
    fn grade_lines_before_any_subject_are_dropped() {
        let text = "Midterm 1 7.5\nMidterm 2 8\nStatistics II\nFinal 9\n";
        let records = parse_grade_table(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Statistics II");
        assert_eq!(grades_of(&records[0]), vec![("Final", "9")]);
    }

    #[test]
    fn single_token_lines_are_skipped() {
        let text = "Philosophy\n101\nContemporary Philosophy\nEssay 8\n";
        let records = parse_grade_table(text);

        // "Philosophy" and "101" carry too little signal to classify.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Contemporary Philosophy");
    }

    #[test]
    fn subject_without_grades_is_still_emitted() {
        let text = "Organic Chemistry\nPhysical Education\nPractice 10\n";
        let records = parse_grade_table(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "Organic Chemistry");
        assert!(records[0].grades.is_empty());
        assert_eq!(records[1].subject, "Physical Education");
    }

    #[test]
    fn trailing_subject_is_flushed_at_end_of_input() {
        let records = parse_grade_table("Linear Algebra\nQuiz 5");
        assert_eq!(records.len(), 1);
        assert_eq!(grades_of(&records[0]), vec![("Quiz", "5")]);
    }

    #[test]
    fn numeric_final_token_makes_a_subject_line_read_as_a_grade() {
        // Known limitation: "Algebra 2" cannot be told apart from a grade
        // line, so it lands as a column of the open subject.
        let text = "Mathematics I\nAlgebra 2\n";
        let records = parse_grade_table(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Mathematics I");
        assert_eq!(grades_of(&records[0]), vec![("Algebra", "2")]);
    }

    #[test]
    fn multi_word_labels_collapse_whitespace_runs() {
        let text = "Spanish Literature\nFirst   Partial \t Exam 6.5\n";
        let records = parse_grade_table(text);

        assert_eq!(grades_of(&records[0]), vec![("First Partial Exam", "6.5")]);
    }

    #[test]
    fn numeric_detection_accepts_float_grammar() {
        let text = "Physics II\nMidterm -2\nExtra 1e2\nCurve .5\nRounded 7.\n";
        let records = parse_grade_table(text);

        assert_eq!(
            grades_of(&records[0]),
            vec![
                ("Midterm", "-2"),
                ("Extra", "1e2"),
                ("Curve", ".5"),
                ("Rounded", "7.")
            ]
        );
    }

    #[test]
    fn literal_nan_token_reads_as_text() {
        let records = parse_grade_table("Course NaN\nQuiz 3\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Course NaN");
    }

    #[test]
    fn comma_decimals_read_as_text_not_numbers() {
        // OCR of Spanish tables can produce "7,5"; the comma keeps the
        // token non-numeric, so the whole line opens a subject.
        let records = parse_grade_table("Biology Lab\nParcial 7,5\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "Biology Lab");
        assert!(records[0].grades.is_empty());
        assert_eq!(records[1].subject, "Parcial 7,5");
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "Statistics I\nMidterm 1 7\nFinal 8.5\nEconomics II\nEssay 9\n";
        let first = parse_grade_table(text);
        assert_eq!(first.len(), 2);
        assert_eq!(first, parse_grade_table(text));
    }
}
