use std::collections::{HashMap, HashSet};

use leon::Template;

use crate::error::Result;

/// Find all tokens in all arguments of templates of command.
#[must_use]
pub fn get_tokens(templates: &[Template]) -> HashSet<String> {
    let mut tokens = HashSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = tokens.insert((*key).to_string());
        }
    }

    tokens
}

/// Parses every argument of a command line as a template.
///
/// # Errors
///
/// Returns an error if any argument contains a malformed placeholder.
pub fn get_templates(command: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

/// Renders each template against `context`.
///
/// # Errors
///
/// Returns an error if a template references a key missing from `context`.
pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}

/// Parses and renders a whole command line in one go.
///
/// # Errors
///
/// See [`get_templates`] and [`interpolate_command`].
pub fn render_command(
    context: &HashMap<String, String>,
    command: &[String],
) -> Result<Vec<String>> {
    let templates = get_templates(command)?;
    interpolate_command(context, &templates)
}
