//! Document assembly for the tex_worksheet crate.

use std::fmt;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fragment::{
    Checklist, Fragment, RuledLines, Section, Text, DEFAULT_OPENUP,
    WRITING_SPACING_CM,
};
use crate::preamble::{PreambleOptions, FOOTER, PAGE_BREAK};

/// Lifecycle state of a [`DocumentAssembler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssemblerState {
    /// The preamble is written and content may be appended.
    Open,
    /// The document-end marker is written; only persisting is allowed.
    Closed,
}

impl fmt::Display for AssemblerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblerState::Open => f.write_str("open"),
            AssemblerState::Closed => f.write_str("closed"),
        }
    }
}

/// Accumulates rendered fragments into a single LaTeX document.
///
/// The preamble is written on construction.  Every content operation renders one fragment and
/// appends it, so the document order is the call order.  Once [`finalize`](Self::finalize) has
/// been called, content operations fail with [`Error::InvalidState`] and leave the buffer as it
/// was.
#[derive(Clone, Debug)]
pub struct DocumentAssembler {
    buffer: String,
    state: AssemblerState,
    options: PreambleOptions,
    fragments: usize,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAssembler {
    /// Creates an assembler using the default preamble options.
    pub fn new() -> Self {
        Self::with_options(PreambleOptions::default())
    }

    /// Creates an assembler and seeds it with the preamble described by `options`.
    pub fn with_options(options: PreambleOptions) -> Self {
        let buffer = options.render();
        Self {
            buffer,
            state: AssemblerState::Open,
            options,
            fragments: 0,
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> AssemblerState {
        self.state
    }

    /// Returns the options the preamble was built from.
    pub fn options(&self) -> &PreambleOptions {
        &self.options
    }

    /// Returns the markup accumulated so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns the number of fragments and page breaks appended after the preamble.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Consumes the assembler and returns the accumulated markup.
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Appends an unnumbered section heading.
    pub fn add_section(&mut self, title: impl Into<String>) -> Result<()> {
        self.push_fragment("add_section", Section::new(title).into())
    }

    /// Appends a paragraph of text.
    pub fn add_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.push_fragment("add_text", Text::new(text).into())
    }

    /// Appends `number_of_lines` ruled handwriting lines with the default spacing and padding.
    pub fn draw_lines(&mut self, number_of_lines: u32) -> Result<()> {
        self.draw_lines_with(number_of_lines, WRITING_SPACING_CM, DEFAULT_OPENUP)
    }

    /// Appends `number_of_lines` ruled handwriting lines with explicit spacing (in centimetres)
    /// and `\openup` padding.
    pub fn draw_lines_with(
        &mut self,
        number_of_lines: u32,
        spacing_cm: f64,
        openup: &str,
    ) -> Result<()> {
        let lines = RuledLines::writing(number_of_lines)
            .with_spacing_cm(spacing_cm)
            .with_openup(openup);
        self.push_fragment("draw_lines", lines.into())
    }

    /// Appends a ruled-lines block exactly as described, without adjusting its line count.
    pub fn draw_ruled_lines(&mut self, lines: RuledLines) -> Result<()> {
        self.push_fragment("draw_ruled_lines", lines.into())
    }

    /// Appends a checkbox list.
    pub fn add_checklist<I, S>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_open("add_checklist")?;
        if !self.options.checklist_enabled() {
            return Err(Error::CapabilityDisabled {
                operation: "add_checklist",
                capability: "checklist",
            });
        }
        self.push_fragment("add_checklist", Checklist::new(items).into())
    }

    /// Appends a page break.
    pub fn new_page(&mut self) -> Result<()> {
        self.ensure_open("new_page")?;
        self.buffer.push_str(PAGE_BREAK);
        self.fragments += 1;
        debug!("Appended page break");
        Ok(())
    }

    /// Closes the document body.  Must be called exactly once.
    pub fn finalize(&mut self) -> Result<()> {
        self.ensure_open("finalize")?;
        self.buffer.push_str(FOOTER);
        self.state = AssemblerState::Closed;
        debug!(
            "Finalized document with {} fragments ({} bytes)",
            self.fragments,
            self.buffer.len()
        );
        Ok(())
    }

    /// Writes the accumulated markup to `path`, replacing any existing file.
    ///
    /// The markup is written to a temporary file next to the destination and then moved into
    /// place, so a failed write leaves no partial document behind.  A symlinked destination is
    /// resolved first and its target is replaced; an existing file keeps its permissions.
    /// Persisting an open document is allowed for debugging, but the result lacks the
    /// document-end marker.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.state == AssemblerState::Open {
            warn!(
                "Persisting unfinalized document to {}; output lacks the document-end marker",
                path.display()
            );
        }

        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let existing = fs::metadata(&target).ok().map(|metadata| metadata.permissions());
        if target != path {
            debug!("Resolved {} to {}", path.display(), target.display());
        }

        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".tex_worksheet");
        // New files get 0o666 filtered through the process umask, like a plain `File::create`.
        #[cfg(unix)]
        builder.permissions(
            existing
                .clone()
                .unwrap_or_else(|| fs::Permissions::from_mode(0o666)),
        );
        let mut file = builder
            .tempfile_in(directory)
            .map_err(|err| Error::io(path, err))?;
        file.write_all(self.buffer.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|err| Error::io(path, err))?;
        if let Some(permissions) = existing {
            fs::set_permissions(file.path(), permissions).map_err(|err| Error::io(path, err))?;
        }
        file.persist(&target)
            .map_err(|err| Error::io(path, err.error))?;

        info!("Wrote {} ({} bytes)", target.display(), self.buffer.len());
        Ok(())
    }

    pub(crate) fn ensure_open(&self, operation: &'static str) -> Result<()> {
        match self.state {
            AssemblerState::Open => Ok(()),
            actual => Err(Error::InvalidState {
                operation,
                expected: AssemblerState::Open,
                actual,
            }),
        }
    }

    fn push_fragment(&mut self, operation: &'static str, fragment: Fragment) -> Result<()> {
        self.ensure_open(operation)?;
        let kind = fragment.kind();
        let markup = fragment.render()?;
        debug!("Appended {} fragment ({} bytes)", kind, markup.len());
        self.buffer.push_str(&markup);
        self.fragments += 1;
        Ok(())
    }
}
