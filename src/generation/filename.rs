//! Filename resolution - the template's own path is rendered as a template
//!
//! `{{ service.name | snake_case }}.go.tmpl` applied to `UserService` resolves
//! to `user_service.go.tmpl`. Paths may be query-escaped so that characters
//! that are awkward in file names (`|`, `"`, spaces) can still appear in the
//! directive.

use std::borrow::Cow;

use crate::generation::renderer::new_engine;
use crate::generation::{GenerationError, HelperLibrary, RenderContext};

const FILENAME_TEMPLATE: &str = "__filename__";

/// Query-unescape a template path: `+` becomes a space, then `%XX` escapes are decoded.
///
/// Falls back to the raw path (with a warning) when the escapes are malformed
/// or decode to invalid UTF-8.
pub fn unescape_path(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    if let Some(position) = malformed_escape(raw) {
        tracing::warn!(
            path = %raw,
            position,
            "failed to unescape filepath: invalid escape sequence"
        );
        return Cow::Borrowed(raw);
    }

    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(e) => {
            tracing::warn!(path = %raw, error = %e, "failed to unescape filepath");
            Cow::Borrowed(raw)
        }
    }
}

/// Byte offset of the first `%` not followed by two hex digits
fn malformed_escape(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let valid = b != b'%'
            || (i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit());
        (!valid).then_some(i)
    })
}

/// Render the raw template path against the context and store the result as its filename.
///
/// The context's filename must still be empty; the path sees the same data the
/// content will, minus the filename itself.
pub fn resolve_filename(
    context: &mut RenderContext,
    helpers: &dyn HelperLibrary,
) -> Result<(), GenerationError> {
    let raw = context.raw_filename.clone();
    let source = unescape_path(&raw);

    let wrap = |e: tera::Error| GenerationError::FilenameError {
        template: raw.clone(),
        source: e,
    };

    let mut tera = new_engine(helpers);
    tera.add_raw_template(FILENAME_TEMPLATE, &source).map_err(wrap)?;
    let tera_context = context.to_tera_context().map_err(wrap)?;
    let filename = tera.render(FILENAME_TEMPLATE, &tera_context).map_err(wrap)?;

    tracing::trace!(template = %raw, filename = %filename, "Resolved filename");
    context.set_filename(filename);
    Ok(())
}
