//! Core entry point for the tex_worksheet crate.
//!
//! Worksheets are assembled from fragments (section headings, text, ruled handwriting lines and
//! checklists) that are rendered to LaTeX and appended in call order:
//!
//! ```no_run
//! use tex_worksheet::DocumentAssembler;
//!
//! let mut assembler = DocumentAssembler::new();
//! assembler.add_section("Intro")?;
//! assembler.add_text("Hello")?;
//! assembler.draw_lines(15)?;
//! assembler.finalize()?;
//! assembler.persist("out.tex")?;
//! # Ok::<(), tex_worksheet::Error>(())
//! ```

pub mod builder;
pub mod error;
pub mod fragment;
pub mod plan;
pub mod preamble;
pub mod sample;

pub use builder::{AssemblerState, DocumentAssembler};
pub use error::{Error, Result};
pub use fragment::{Checklist, Fragment, FragmentKind, RuledLines, Section, Text};
#[cfg(feature = "serde")]
pub use plan::parse_plan_json;
pub use plan::{build_plan, persist_plan, PlanStep, RawStep, StepKind};
pub use preamble::{PageGeometry, PreambleOptions};
