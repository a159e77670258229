//! Fixed opening and closing markup plus the options that shape the preamble.

use log::trace;

/// Marker closing the document body.
pub const FOOTER: &str = "\\end{document}\n";

/// Marker forcing a page break.
pub const PAGE_BREAK: &str = "\\newpage\n";

/// Marker opening the document body.
pub const BEGIN_DOCUMENT: &str = "\\begin{document}\n";

/// Definition of the `\lines{count}{spacing}` macro.
///
/// The loop runs while the counter is below `count`, starting at one, so it draws `count - 1`
/// rules, each followed by a vertical gap of `spacing`.
pub const LINES_MACRO: &str = concat!(
    "\\usepackage{forloop}\n",
    "\\newcounter{ct}\n",
    "\\newcommand{\\lines}[2]{% #1: number of lines, #2: spacing between lines\n",
    "  \\forloop{ct}{1}{\\value{ct} < #1}{\\noindent\\rule{\\linewidth}{0.4pt}\\\\[#2]}\n",
    "}\n",
);

const DEFAULT_FONT_SIZE_PT: u8 = 12;

/// Page dimensions passed to the `geometry` package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageGeometry {
    paper: String,
    total_width: String,
    total_height: String,
    margin: Option<String>,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::compact()
    }
}

impl PageGeometry {
    /// A4 paper with a 4in × 6in text block and half-inch margins.
    pub fn compact() -> Self {
        Self {
            paper: "a4paper".to_owned(),
            total_width: "4in".to_owned(),
            total_height: "6in".to_owned(),
            margin: Some("0.5in".to_owned()),
        }
    }

    /// A4 paper with a 6in × 8in text block and geometry's automatic margins.
    pub fn roomy() -> Self {
        Self {
            total_width: "6in".to_owned(),
            total_height: "8in".to_owned(),
            margin: None,
            ..Self::compact()
        }
    }

    /// Sets the paper name (e.g. `"letterpaper"`).
    pub fn with_paper(mut self, paper: impl Into<String>) -> Self {
        self.paper = paper.into();
        self
    }

    /// Sets the text block dimensions, including units.
    pub fn with_total(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.total_width = width.into();
        self.total_height = height.into();
        self
    }

    /// Sets or clears the uniform page margin.
    pub fn with_margin(mut self, margin: impl Into<Option<String>>) -> Self {
        self.margin = margin.into();
        self
    }

    fn directive(&self) -> String {
        let mut options = format!(
            "{}, total={{{}, {}}}",
            self.paper, self.total_width, self.total_height
        );
        if let Some(margin) = &self.margin {
            options.push_str(", margin=");
            options.push_str(margin);
        }
        format!("\\usepackage[{options}]{{geometry}}\n")
    }
}

/// Options controlling the document preamble and the assembler capabilities it enables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreambleOptions {
    font_size_pt: u8,
    geometry: PageGeometry,
    checklist: bool,
    suppress_page_numbers: bool,
}

impl Default for PreambleOptions {
    fn default() -> Self {
        Self {
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            geometry: PageGeometry::default(),
            checklist: true,
            suppress_page_numbers: false,
        }
    }
}

impl PreambleOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base font size passed to the document class.
    pub fn with_font_size_pt(mut self, font_size_pt: u8) -> Self {
        self.font_size_pt = font_size_pt;
        self
    }

    /// Sets the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Enables or disables checklist support, including the `amssymb` import it needs.
    pub fn with_checklist(mut self, enabled: bool) -> Self {
        self.checklist = enabled;
        self
    }

    /// Enables or disables page numbers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.suppress_page_numbers = !enabled;
        self
    }

    /// Returns the base font size in points.
    pub fn font_size_pt(&self) -> u8 {
        self.font_size_pt
    }

    /// Returns the configured page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Returns whether checklists may be added.
    pub fn checklist_enabled(&self) -> bool {
        self.checklist
    }

    /// Returns whether page numbers are printed.
    pub fn page_numbers_enabled(&self) -> bool {
        !self.suppress_page_numbers
    }

    /// Renders the full preamble, ending with the `\begin{document}` marker.
    pub fn render(&self) -> String {
        trace!(
            "Rendering preamble ({}pt, checklist: {}, page numbers: {})",
            self.font_size_pt,
            self.checklist,
            self.page_numbers_enabled()
        );

        let mut preamble = format!("\\documentclass[{}pt]{{article}}\n", self.font_size_pt);
        preamble.push_str(&self.geometry.directive());
        preamble.push_str(LINES_MACRO);
        if self.checklist {
            preamble.push_str("\\usepackage{amssymb}\n");
        }
        if self.suppress_page_numbers {
            preamble.push_str("\\pagestyle{empty}\n");
        }
        preamble.push_str(BEGIN_DOCUMENT);
        preamble
    }
}
