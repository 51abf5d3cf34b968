//! Python bindings for mdtoc heading extraction.

use mdtoc_core::{
    build_toc as core_build_toc, clean_heading_text as core_clean_heading_text,
    extract_headings as core_extract_headings,
    fix_indented_code_blocks as core_fix_indented_code_blocks, slugify as core_slugify,
    Heading as CoreHeading, Outline as CoreOutline, TocNode as CoreTocNode,
};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use pyo3::IntoPyObjectExt;

/// Document content as passed from Python: `str` or `bytes`.
#[derive(FromPyObject)]
enum Source {
    Text(String),
    Bytes(Vec<u8>),
}

impl Source {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Source::Text(s) => s.as_bytes(),
            Source::Bytes(b) => b,
        }
    }

    /// Wrap `content` in the same Python type this source came in as.
    fn same_type(&self, py: Python<'_>, content: &[u8]) -> PyResult<PyObject> {
        match self {
            // Fixing only inserts ASCII spaces at line starts, so text stays valid UTF-8.
            Source::Text(_) => String::from_utf8_lossy(content).into_py_any(py),
            Source::Bytes(_) => Ok(PyBytes::new(py, content).into_any().unbind()),
        }
    }
}

// ============================================================================
// Heading
// ============================================================================

/// A heading with its display text and anchor id.
#[pyclass(frozen, get_all, eq, hash, name = "Heading")]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PyHeading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

#[pymethods]
impl PyHeading {
    #[new]
    #[pyo3(text_signature = "(level, text, id)")]
    fn new(level: u8, text: String, id: String) -> Self {
        PyHeading { level, text, id }
    }

    /// The `#id` link target.
    #[getter]
    fn fragment(&self) -> String {
        format!("#{}", self.id)
    }

    fn __repr__(&self) -> String {
        format!("Heading({}, {:?}, {:?})", self.level, self.text, self.id)
    }
}

impl From<CoreHeading> for PyHeading {
    fn from(h: CoreHeading) -> Self {
        PyHeading {
            level: h.level,
            text: h.text,
            id: h.id,
        }
    }
}

impl From<PyHeading> for CoreHeading {
    fn from(h: PyHeading) -> Self {
        CoreHeading {
            level: h.level,
            text: h.text,
            id: h.id,
        }
    }
}

// ============================================================================
// TocNode
// ============================================================================

/// A table-of-contents entry and the entries nested under it.
#[pyclass(frozen, get_all, eq, name = "TocNode")]
#[derive(Clone, PartialEq)]
pub struct PyTocNode {
    pub heading: PyHeading,
    pub children: Vec<PyTocNode>,
}

#[pymethods]
impl PyTocNode {
    fn __repr__(&self) -> String {
        format!(
            "TocNode({:?}, children={})",
            self.heading.text,
            self.children.len()
        )
    }

    fn __len__(&self) -> usize {
        self.children.len()
    }
}

impl From<CoreTocNode> for PyTocNode {
    fn from(node: CoreTocNode) -> Self {
        PyTocNode {
            heading: node.heading.into(),
            children: node.children.into_iter().map(PyTocNode::from).collect(),
        }
    }
}

fn convert_toc(toc: Vec<CoreTocNode>) -> Vec<PyTocNode> {
    toc.into_iter().map(PyTocNode::from).collect()
}

// ============================================================================
// Outline
// ============================================================================

/// Fixed content, headings and TOC of one document.
#[pyclass(frozen, name = "Outline")]
pub struct PyOutline {
    /// Content after the indent fix, `str` or `bytes` like the input.
    #[pyo3(get)]
    pub content: PyObject,
    #[pyo3(get)]
    pub headings: Vec<PyHeading>,
    #[pyo3(get)]
    pub toc: Vec<PyTocNode>,
    #[pyo3(get)]
    pub was_fixed: bool,
}

#[pymethods]
impl PyOutline {
    fn __repr__(&self) -> String {
        format!(
            "Outline(headings={}, toc={}, was_fixed={})",
            self.headings.len(),
            self.toc.len(),
            if self.was_fixed { "True" } else { "False" }
        )
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Extract headings from Markdown, skipping fenced code.
///
/// Args:
///     content: Markdown as str or bytes
///
/// Returns:
///     list[Heading]: Headings in document order, with unique ids
#[pyfunction]
#[pyo3(text_signature = "(content)")]
fn extract_headings(content: Source) -> Vec<PyHeading> {
    core_extract_headings(content.as_bytes())
        .into_iter()
        .map(PyHeading::from)
        .collect()
}

/// Nest a flat heading list into a TOC tree.
///
/// Args:
///     headings: Headings in document order
///
/// Returns:
///     list[TocNode]: Top-level entries
#[pyfunction]
#[pyo3(text_signature = "(headings)")]
fn build_toc(headings: Vec<PyHeading>) -> Vec<PyTocNode> {
    let headings: Vec<CoreHeading> = headings.into_iter().map(CoreHeading::from).collect();
    convert_toc(core_build_toc(&headings))
}

/// Shift code blocks embedded in list items two columns right.
///
/// Returns the same type it was given: str for str, bytes for bytes.
#[pyfunction]
#[pyo3(text_signature = "(content)")]
fn fix_indented_code_blocks(py: Python<'_>, content: Source) -> PyResult<PyObject> {
    let fixed = core_fix_indented_code_blocks(content.as_bytes());
    content.same_type(py, &fixed)
}

/// Anchor slug for already-cleaned heading text.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn slugify(text: &str) -> String {
    core_slugify(text)
}

/// Remove inline Markdown formatting from heading text.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn clean_heading_text(text: &str) -> String {
    core_clean_heading_text(text)
}

/// Fix, extract and nest in one call.
///
/// Args:
///     content: Markdown as str or bytes
///
/// Returns:
///     Outline: Fixed content (same type as input), headings and TOC
#[pyfunction]
#[pyo3(text_signature = "(content)")]
fn outline(py: Python<'_>, content: Source) -> PyResult<PyOutline> {
    let outline = CoreOutline::from_markdown(content.as_bytes());
    let was_fixed = outline.was_fixed();
    let (fixed, headings, toc) = outline.into_parts();

    Ok(PyOutline {
        content: content.same_type(py, &fixed)?,
        headings: headings.into_iter().map(PyHeading::from).collect(),
        toc: convert_toc(toc),
        was_fixed,
    })
}

#[pymodule]
fn pymdtoc(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHeading>()?;
    m.add_class::<PyTocNode>()?;
    m.add_class::<PyOutline>()?;
    m.add_function(wrap_pyfunction!(extract_headings, m)?)?;
    m.add_function(wrap_pyfunction!(build_toc, m)?)?;
    m.add_function(wrap_pyfunction!(fix_indented_code_blocks, m)?)?;
    m.add_function(wrap_pyfunction!(slugify, m)?)?;
    m.add_function(wrap_pyfunction!(clean_heading_text, m)?)?;
    m.add_function(wrap_pyfunction!(outline, m)?)?;
    Ok(())
}
