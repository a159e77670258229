//! Fragment builders that turn typed parameters into LaTeX markup.
//!
//! Every fragment kind has its own parameter record ([`Section`], [`Text`], [`RuledLines`] and
//! [`Checklist`]) and the closed [`Fragment`] enum ties them together behind a single
//! [`Fragment::render`] entry point.  Rendering is a pure function of the parameters; the
//! [`crate::builder::DocumentAssembler`] decides where the output lands.
//!
//! User-supplied text (titles, paragraph content, checklist items) is inserted verbatim.  LaTeX
//! special characters such as `%`, `&` or `_` are not escaped, so callers that need them must
//! escape them before handing the text over.

use std::fmt;

use crate::error::{Error, Result};

/// Number of macro lines requested when [`RuledLines::default`] is used.
pub const DEFAULT_LINE_COUNT: u64 = 10;

/// Gap between ruled lines, in centimetres, when [`RuledLines::default`] is used.
pub const DEFAULT_SPACING_CM: f64 = 3.0;

/// Extra line padding applied inside a ruled-lines block.
pub const DEFAULT_OPENUP: &str = "0.8cm";

/// Gap between ruled lines, in centimetres, used for handwriting blocks drawn by the assembler.
pub const WRITING_SPACING_CM: f64 = 0.29;

/// Conversion factor from the centimetre spacing parameter to the emitted millimetre length.
pub const MM_PER_CM: f64 = 10.0;

/// Marker placed in front of every checklist entry.
pub const CHECKBOX_MARKER: &str = "$\\square$";

/// Tag identifying the kind of a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Unnumbered section heading.
    Section,
    /// Plain paragraph text.
    Text,
    /// Block of ruled handwriting lines.
    RuledLines,
    /// Itemised list of checkboxes.
    Checklist,
}

impl FragmentKind {
    /// Returns the lowercase name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            FragmentKind::Section => "section",
            FragmentKind::Text => "text",
            FragmentKind::RuledLines => "ruled lines",
            FragmentKind::Checklist => "checklist",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unnumbered section heading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    title: String,
}

impl Section {
    /// Creates a heading with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Returns the heading title.
    pub fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        format!("\\section*{{{}}}\n", self.title)
    }
}

/// Paragraph text emitted as-is followed by a line break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    /// Creates a text fragment.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    fn render(&self) -> String {
        format!("{}\n", self.content)
    }
}

/// Block of ruled lines that leaves room for handwriting.
///
/// `number_of_lines` is the count passed to the preamble's `\lines` macro, which draws one rule
/// fewer than it is given.  Use [`RuledLines::writing`] to ask for a number of visible lines
/// instead.
#[derive(Clone, Debug, PartialEq)]
pub struct RuledLines {
    number_of_lines: u64,
    spacing_cm: f64,
    openup: String,
    label: Option<String>,
}

impl Default for RuledLines {
    fn default() -> Self {
        Self {
            number_of_lines: DEFAULT_LINE_COUNT,
            spacing_cm: DEFAULT_SPACING_CM,
            openup: DEFAULT_OPENUP.to_owned(),
            label: None,
        }
    }
}

impl RuledLines {
    /// Creates a block whose `\lines` invocation receives `number_of_lines` unchanged.
    pub fn new(number_of_lines: u64) -> Self {
        Self {
            number_of_lines,
            ..Self::default()
        }
    }

    /// Creates a block showing `writing_lines` visible rules with the handwriting spacing.
    ///
    /// The `\lines` macro loops while its counter is below the requested count, so the block asks
    /// it for `writing_lines + 1`.
    pub fn writing(writing_lines: u32) -> Self {
        Self::new(u64::from(writing_lines) + 1).with_spacing_cm(WRITING_SPACING_CM)
    }

    /// Returns the count handed to the `\lines` macro.
    pub fn number_of_lines(&self) -> u64 {
        self.number_of_lines
    }

    /// Returns the gap between lines in centimetres.
    pub fn spacing_cm(&self) -> f64 {
        self.spacing_cm
    }

    /// Returns the `\openup` length.
    pub fn openup(&self) -> &str {
        &self.openup
    }

    /// Returns the trailing comment label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the gap between lines in centimetres.
    pub fn with_spacing_cm(mut self, spacing_cm: f64) -> Self {
        self.spacing_cm = spacing_cm;
        self
    }

    /// Sets the `\openup` length, including its unit (e.g. `"0.8cm"`).
    pub fn with_openup(mut self, openup: impl Into<String>) -> Self {
        self.openup = openup.into();
        self
    }

    /// Sets a label emitted as a LaTeX comment after the `\lines` invocation.
    pub fn with_label(mut self, label: impl Into<Option<String>>) -> Self {
        self.label = label.into();
        self
    }

    fn render(&self) -> Result<String> {
        if !self.spacing_cm.is_finite() || self.spacing_cm < 0.0 {
            return Err(Error::invalid(
                FragmentKind::RuledLines,
                format!(
                    "spacing must be a finite, non-negative length, got {}",
                    self.spacing_cm
                ),
            ));
        }
        let openup = self.openup.trim();
        if openup.is_empty() {
            return Err(Error::invalid(
                FragmentKind::RuledLines,
                "openup length must not be empty",
            ));
        }

        let comment = match &self.label {
            // A newline would end the comment early and leave the rest as live markup.
            Some(label) => format!(" % {}", label.replace(['\r', '\n'], " ")),
            None => String::new(),
        };

        Ok(format!(
            "{{\\openup {}\n\\lines{{{}}}{{{}}}{}\n}}\n",
            openup,
            self.number_of_lines,
            format_millimetres(self.spacing_cm),
            comment
        ))
    }
}

/// Formats a centimetre value as a millimetre length, e.g. `0.29` as `2.9mm`.
pub fn format_millimetres(spacing_cm: f64) -> String {
    let mut value = format!("{:.6}", spacing_cm * MM_PER_CM);
    if value.contains('.') {
        let trimmed = value.trim_end_matches('0').trim_end_matches('.').len();
        value.truncate(trimmed);
    }
    if value == "-0" {
        value = "0".to_owned();
    }
    value.push_str("mm");
    value
}

/// List of checkbox entries, rendered in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checklist {
    items: Vec<String>,
}

impl Checklist {
    /// Creates a checklist from the given entries.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the checklist entries.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn render(&self) -> String {
        let mut markup = String::from("\\begin{itemize}\n");
        for item in &self.items {
            markup.push_str("\\item[");
            markup.push_str(CHECKBOX_MARKER);
            markup.push_str("] ");
            markup.push_str(item);
            markup.push('\n');
        }
        markup.push_str("\\end{itemize}\n");
        markup
    }
}

/// A single renderable piece of document content.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    /// Section heading.
    Section(Section),
    /// Paragraph text.
    Text(Text),
    /// Ruled handwriting lines.
    RuledLines(RuledLines),
    /// Checkbox list.
    Checklist(Checklist),
}

impl Fragment {
    /// Returns the kind tag of this fragment.
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Section(_) => FragmentKind::Section,
            Fragment::Text(_) => FragmentKind::Text,
            Fragment::RuledLines(_) => FragmentKind::RuledLines,
            Fragment::Checklist(_) => FragmentKind::Checklist,
        }
    }

    /// Renders the fragment to LaTeX markup.
    pub fn render(&self) -> Result<String> {
        match self {
            Fragment::Section(section) => Ok(section.render()),
            Fragment::Text(text) => Ok(text.render()),
            Fragment::RuledLines(lines) => lines.render(),
            Fragment::Checklist(checklist) => Ok(checklist.render()),
        }
    }
}

impl From<Section> for Fragment {
    fn from(section: Section) -> Self {
        Self::Section(section)
    }
}

impl From<Text> for Fragment {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<RuledLines> for Fragment {
    fn from(lines: RuledLines) -> Self {
        Self::RuledLines(lines)
    }
}

impl From<Checklist> for Fragment {
    fn from(checklist: Checklist) -> Self {
        Self::Checklist(checklist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fragment: impl Into<Fragment>) -> String {
        fragment.into().render().expect("fragment renders")
    }

    #[test]
    fn section_is_unnumbered_heading() {
        assert_eq!(render(Section::new("Intro")), "\\section*{Intro}\n");
    }

    #[test]
    fn section_passes_special_characters_through() {
        assert_eq!(render(Section::new("50% & more")), "\\section*{50% & more}\n");
        assert_eq!(render(Section::new("")), "\\section*{}\n");
    }

    #[test]
    fn text_appends_line_break() {
        assert_eq!(render(Text::new("Hello")), "Hello\n");
    }

    #[test]
    fn ruled_lines_defaults() {
        assert_eq!(
            render(RuledLines::default()),
            "{\\openup 0.8cm\n\\lines{10}{30mm}\n}\n"
        );
    }

    #[test]
    fn writing_lines_request_one_extra_macro_line() {
        let lines = RuledLines::writing(15);
        assert_eq!(lines.number_of_lines(), 16);
        assert_eq!(
            render(lines),
            "{\\openup 0.8cm\n\\lines{16}{2.9mm}\n}\n"
        );
    }

    #[test]
    fn writing_lines_cover_the_full_count_range() {
        let lines = RuledLines::writing(u32::MAX);
        assert_eq!(lines.number_of_lines(), 4_294_967_296);
        assert!(render(lines).contains("\\lines{4294967296}{2.9mm}"));
    }

    #[test]
    fn millimetre_formatting() {
        assert_eq!(format_millimetres(0.0), "0mm");
        assert_eq!(format_millimetres(-0.0), "0mm");
        assert_eq!(format_millimetres(0.29), "2.9mm");
        assert_eq!(format_millimetres(0.8), "8mm");
        assert_eq!(format_millimetres(1.25), "12.5mm");
    }

    #[test]
    fn ruled_lines_reject_bad_spacing() {
        for spacing in [f64::NAN, f64::INFINITY, -1.0] {
            let result = Fragment::from(RuledLines::new(3).with_spacing_cm(spacing)).render();
            assert!(
                matches!(result, Err(Error::InvalidFragment { .. })),
                "spacing {spacing} should be rejected"
            );
        }
    }

    #[test]
    fn ruled_lines_reject_empty_openup() {
        let result = Fragment::from(RuledLines::new(3).with_openup("  ")).render();
        assert!(matches!(result, Err(Error::InvalidFragment { .. })));
    }

    #[test]
    fn ruled_lines_label_becomes_single_line_comment() {
        let lines = RuledLines::new(16)
            .with_spacing_cm(0.8)
            .with_label(Some("15 lines\nwith 8mm spacing".to_string()));
        assert_eq!(
            render(lines),
            "{\\openup 0.8cm\n\\lines{16}{8mm} % 15 lines with 8mm spacing\n}\n"
        );
    }

    #[test]
    fn empty_checklist_keeps_delimiters() {
        assert_eq!(
            render(Checklist::default()),
            "\\begin{itemize}\n\\end{itemize}\n"
        );
    }

    #[test]
    fn checklist_entries_keep_order() {
        assert_eq!(
            render(Checklist::new(["A", "B"])),
            "\\begin{itemize}\n\\item[$\\square$] A\n\\item[$\\square$] B\n\\end{itemize}\n"
        );
    }

    #[test]
    fn accessors_expose_parameters() {
        assert_eq!(Section::new("Intro").title(), "Intro");
        assert_eq!(Text::new("Hello").content(), "Hello");
        assert_eq!(Checklist::new(["A", "B"]).items(), ["A", "B"]);

        let lines = RuledLines::new(4)
            .with_spacing_cm(1.5)
            .with_openup("2mm")
            .with_label(Some("notes".to_string()));
        assert_eq!(lines.number_of_lines(), 4);
        assert_eq!(lines.spacing_cm(), 1.5);
        assert_eq!(lines.openup(), "2mm");
        assert_eq!(lines.label(), Some("notes"));
        assert_eq!(RuledLines::default().label(), None);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Fragment::from(Text::new("x")).kind(), FragmentKind::Text);
        assert_eq!(
            Fragment::from(Checklist::default()).kind(),
            FragmentKind::Checklist
        );
        assert_eq!(FragmentKind::RuledLines.to_string(), "ruled lines");
    }
}
