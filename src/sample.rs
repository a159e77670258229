//! Ready-made worksheet plans.

use crate::plan::PlanStep;

/// Alternating typed and handwritten sections: two text sections, each followed by a block of
/// ruled lines (15 and 20 lines).
pub fn handwriting_worksheet() -> Vec<PlanStep> {
    vec![
        PlanStep::section("Computer Text Section 1"),
        PlanStep::text("This section contains the first part of regular computer text."),
        PlanStep::section("Handwriting Section 1"),
        PlanStep::lines(15),
        PlanStep::section("Computer Text Section 2"),
        PlanStep::text("This section contains the second part of regular computer text."),
        PlanStep::section("Handwriting Section 2"),
        PlanStep::lines(20),
    ]
}

#[cfg(test)]
mod tests {
    use super::handwriting_worksheet;
    use crate::plan::build_plan;
    use crate::preamble::PreambleOptions;

    #[test]
    fn sample_alternates_text_and_lines() {
        let document = build_plan(&handwriting_worksheet(), PreambleOptions::default())
            .expect("sample builds")
            .into_string();

        let first = document.find("\\lines{16}{2.9mm}").expect("15 writing lines");
        let second = document.find("\\lines{21}{2.9mm}").expect("20 writing lines");
        let middle = document
            .find("\\section*{Computer Text Section 2}")
            .expect("second text section");
        assert!(first < middle && middle < second);
    }
}
