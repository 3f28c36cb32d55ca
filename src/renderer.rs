//! Template renderer and rendering functionality for gt.
//! Drives data binding, template parsing and execution for one render call.
use std::sync::Arc;

use log::debug;

use crate::binder::bind;
use crate::error::Result;
use crate::funcs::FunctionLibrary;
use crate::template::{ParseError, Template};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template against a data buffer.
    ///
    /// # Arguments
    /// * `template` - Template source bytes
    /// * `data` - JSON data bytes, or `None` for no data
    ///
    /// # Returns
    /// * `Result<String>` - The complete rendered output
    fn render(&self, template: &[u8], data: Option<&[u8]>) -> Result<String>;
}

/// Go `text/template` rendering engine.
#[derive(Debug, Clone)]
pub struct GoTemplateRenderer {
    /// Functions available to every template this renderer parses
    library: Arc<FunctionLibrary>,
}

impl GoTemplateRenderer {
    /// Creates a renderer around a shared function library.
    pub fn new(library: Arc<FunctionLibrary>) -> Self {
        Self { library }
    }

    /// Returns the function library templates are parsed against.
    pub fn library(&self) -> &FunctionLibrary {
        &self.library
    }
}

impl Default for GoTemplateRenderer {
    fn default() -> Self {
        GoTemplateRenderer::new(Arc::new(FunctionLibrary::default()))
    }
}

impl TemplateRenderer for GoTemplateRenderer {
    /// Renders a template using the renderer's function library.
    ///
    /// # Errors
    /// * `Error::DataParseError` if the data is not valid JSON
    /// * `Error::TemplateParseError` if:
    ///   - The template is not valid UTF-8
    ///   - The template does not parse
    /// * `Error::RenderExecutionError` if execution faults
    fn render(&self, template: &[u8], data: Option<&[u8]>) -> Result<String> {
        let data = bind(data)?;
        let source = std::str::from_utf8(template)
            .map_err(|err| ParseError::new(format!("template is not valid UTF-8: {err}")))?;

        let template = Template::parse(source, &self.library)?;
        debug!("Parsed template of {} byte(s)", source.len());

        let output = template.execute(&data)?;
        debug!("Rendered {} byte(s) of output", output.len());
        Ok(output)
    }
}

/// Renders `template` against `data` with the default function library.
///
/// ```
/// let output = gt::render(b"Hello, {{ .name }}!", Some(br#"{"name": "John"}"#)).unwrap();
/// assert_eq!(output, "Hello, John!");
/// ```
pub fn render(template: &[u8], data: Option<&[u8]>) -> Result<String> {
    GoTemplateRenderer::default().render(template, data)
}
