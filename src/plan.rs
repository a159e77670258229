//! Serialization-friendly descriptions of whole worksheets.
//!
//! A plan is an ordered list of [`PlanStep`] values that maps one-to-one onto the
//! [`DocumentAssembler`] operations.  Plans can be written in code, or parsed from JSON through the
//! loosely-typed [`RawStep`] record when the `serde` feature is enabled.  Converting a [`RawStep`]
//! into a [`PlanStep`] is where absent required parameters are reported.

use std::path::Path;

use log::info;

use crate::builder::DocumentAssembler;
use crate::error::{Error, Result};
use crate::fragment::{FragmentKind, RuledLines, DEFAULT_OPENUP, WRITING_SPACING_CM};
use crate::preamble::PreambleOptions;

/// One step of a worksheet plan.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanStep {
    /// Unnumbered section heading.
    Section {
        /// Heading title.
        title: String,
    },
    /// Paragraph text.
    Text {
        /// Text content.
        content: String,
    },
    /// Ruled handwriting lines.
    Lines {
        /// Number of visible writing lines.
        number_of_lines: u32,
        /// Gap between lines in centimetres.
        spacing_cm: f64,
        /// `\openup` padding, including its unit.
        openup: String,
        /// Optional comment emitted next to the lines.
        label: Option<String>,
    },
    /// Checkbox list.
    Checklist {
        /// Entries in display order.
        items: Vec<String>,
    },
    /// Page break.
    NewPage,
}

impl PlanStep {
    /// Creates a section step.
    pub fn section(title: impl Into<String>) -> Self {
        Self::Section {
            title: title.into(),
        }
    }

    /// Creates a text step.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Creates a handwriting-lines step with the default spacing and padding.
    pub fn lines(number_of_lines: u32) -> Self {
        Self::Lines {
            number_of_lines,
            spacing_cm: WRITING_SPACING_CM,
            openup: DEFAULT_OPENUP.to_owned(),
            label: None,
        }
    }

    /// Creates a checklist step.
    pub fn checklist<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checklist {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Kind tag of a [`RawStep`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// See [`PlanStep::Section`].
    Section,
    /// See [`PlanStep::Text`].
    Text,
    /// See [`PlanStep::Lines`].
    Lines,
    /// See [`PlanStep::Checklist`].
    Checklist,
    /// See [`PlanStep::NewPage`].
    NewPage,
}

/// Loosely-typed plan step: a kind tag plus optional named parameters.
///
/// Which fields are required depends on `kind`; [`PlanStep::try_from`] checks them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct RawStep {
    /// Step kind.
    pub kind: StepKind,
    /// Section title.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// Text content.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Option<String>,
    /// Number of writing lines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub number_of_lines: Option<u32>,
    /// Gap between lines in centimetres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: Option<f64>,
    /// `\openup` padding.
    #[cfg_attr(feature = "serde", serde(default))]
    pub openup: Option<String>,
    /// Comment emitted next to ruled lines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// Checklist entries.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Option<Vec<String>>,
}

impl RawStep {
    /// Creates an empty raw step of the given kind.
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            title: None,
            content: None,
            number_of_lines: None,
            spacing: None,
            openup: None,
            label: None,
            items: None,
        }
    }
}

fn required<T>(value: Option<T>, kind: FragmentKind, field: &'static str) -> Result<T> {
    value.ok_or(Error::MissingParameter { kind, field })
}

impl TryFrom<RawStep> for PlanStep {
    type Error = Error;

    fn try_from(raw: RawStep) -> Result<Self> {
        Ok(match raw.kind {
            StepKind::Section => PlanStep::Section {
                title: required(raw.title, FragmentKind::Section, "title")?,
            },
            StepKind::Text => PlanStep::Text {
                content: required(raw.content, FragmentKind::Text, "content")?,
            },
            StepKind::Lines => PlanStep::Lines {
                number_of_lines: required(
                    raw.number_of_lines,
                    FragmentKind::RuledLines,
                    "number_of_lines",
                )?,
                spacing_cm: raw.spacing.unwrap_or(WRITING_SPACING_CM),
                openup: raw.openup.unwrap_or_else(|| DEFAULT_OPENUP.to_owned()),
                label: raw.label,
            },
            StepKind::Checklist => PlanStep::Checklist {
                items: required(raw.items, FragmentKind::Checklist, "items")?,
            },
            StepKind::NewPage => PlanStep::NewPage,
        })
    }
}

/// Parses a JSON array of raw steps into a validated plan.
#[cfg(feature = "serde")]
pub fn parse_plan_json(json: &str) -> Result<Vec<PlanStep>> {
    let raw: Vec<RawStep> = serde_json::from_str(json)?;
    raw.into_iter().map(PlanStep::try_from).collect()
}

impl DocumentAssembler {
    /// Applies a single plan step through the matching assembler operation.
    pub fn apply(&mut self, step: &PlanStep) -> Result<()> {
        match step {
            PlanStep::Section { title } => self.add_section(title.as_str()),
            PlanStep::Text { content } => self.add_text(content.as_str()),
            PlanStep::Lines {
                number_of_lines,
                spacing_cm,
                openup,
                label,
            } => self.draw_ruled_lines(
                RuledLines::writing(*number_of_lines)
                    .with_spacing_cm(*spacing_cm)
                    .with_openup(openup.as_str())
                    .with_label(label.clone()),
            ),
            PlanStep::Checklist { items } => self.add_checklist(items.iter().map(String::as_str)),
            PlanStep::NewPage => self.new_page(),
        }
    }
}

/// Applies every step of `plan` to a fresh assembler and finalizes the document.
pub fn build_plan(plan: &[PlanStep], options: PreambleOptions) -> Result<DocumentAssembler> {
    let mut assembler = DocumentAssembler::with_options(options);
    for step in plan {
        assembler.apply(step)?;
    }
    assembler.finalize()?;
    Ok(assembler)
}

/// Builds the document described by `plan` and writes it to `path`.
///
/// Nothing is written unless every step succeeded.
pub fn persist_plan(
    plan: &[PlanStep],
    options: PreambleOptions,
    path: impl AsRef<Path>,
) -> Result<DocumentAssembler> {
    let assembler = build_plan(plan, options)?;
    assembler.persist(path.as_ref())?;
    info!(
        "Persisted {}-step worksheet plan to {}",
        plan.len(),
        path.as_ref().display()
    );
    Ok(assembler)
}
