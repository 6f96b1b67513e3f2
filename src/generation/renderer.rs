//! Tera-based content renderer

use std::path::Path;
use tera::Tera;

use crate::generation::utils::{base_name, dir_name};
use crate::generation::{GenerationError, HelperLibrary, RenderContext, TemplateUnit};

/// A template engine with autoescaping off and every helper registered
pub(crate) fn new_engine(helpers: &dyn HelperLibrary) -> Tera {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    helpers.register(&mut tera);
    tera
}

/// Output path for a rendered template, namespaced by the schema file it was rendered for.
///
/// `dir(filename)/<schema base>_<filename base>`, e.g. `svc/user.go.tmpl`
/// rendered for `acme/users.proto` becomes `svc/users.proto_user.go.tmpl`.
pub fn derive_output_path(schema_file: &str, filename: &str) -> String {
    format!(
        "{}/{}_{}",
        dir_name(filename),
        base_name(schema_file),
        base_name(filename)
    )
}

/// Load a template from disk and render it against a fully resolved context.
///
/// Returns the rendered body and the derived output path (still carrying the
/// template suffix).
pub fn render_content(
    template_dir: &Path,
    unit: &TemplateUnit,
    context: &RenderContext,
    helpers: &dyn HelperLibrary,
) -> Result<(String, String), GenerationError> {
    let wrap = |e: tera::Error| GenerationError::RenderError {
        template: unit.to_string(),
        source: e,
    };

    let full_path = template_dir.join(unit.as_str());
    let mut tera = new_engine(helpers);
    tera.add_template_file(&full_path, Some(unit.as_str()))
        .map_err(wrap)?;

    let tera_context = context.to_tera_context().map_err(wrap)?;
    let content = tera.render(unit.as_str(), &tera_context).map_err(wrap)?;

    let output_path = derive_output_path(&context.file.name, context.filename());
    Ok((content, output_path))
}
