//! Human-readable report of a catalog run.

use owo_colors::Style;

use crate::{
    diff,
    manager::{Origin, Outcome, Resolution},
    palette, paths,
};

/// Width of the field name column.
const FIELD_WIDTH: usize = 18;

/// Describe where a field value came from, with the style to show it in.
fn describe(origin: &Origin) -> (String, Style) {
    match origin {
        Origin::Existing => ("kept".to_string(), palette::kept()),
        Origin::Explicit => ("from --catalog-identifier".to_string(), palette::filled()),
        Origin::StoredVariable => ("from repository variable".to_string(), palette::filled()),
        Origin::Generated { stored: true } => (
            "generated, stored in repository variable".to_string(),
            palette::filled(),
        ),
        Origin::Generated { stored: false } => (
            "generated, not stored in repository variable".to_string(),
            palette::warning(),
        ),
        Origin::GitHub => ("from repository description".to_string(), palette::filled()),
        Origin::Placeholder => ("placeholder".to_string(), palette::warning()),
        Origin::Topics { added: 0 } => ("no new topics".to_string(), palette::kept()),
        Origin::Topics { added: 1 } => ("1 topic added".to_string(), palette::filled()),
        Origin::Topics { added } => (format!("{added} topics added"), palette::filled()),
        Origin::RepositoryName => ("from repository name".to_string(), palette::filled()),
        Origin::Tag(tag) => (format!("from tag {tag}"), palette::filled()),
        Origin::Unchanged => ("unchanged".to_string(), palette::kept()),
    }
}

/// Render one resolution line.
fn render_line(resolution: &Resolution, color: bool) -> String {
    let key = format!("{:<FIELD_WIDTH$}", resolution.field.key());
    let (text, style) = describe(&resolution.origin);
    format!(
        "  {}{}\n",
        palette::paint(&key, palette::field(), color),
        palette::paint(&text, style, color)
    )
}

/// Render the per-field summary for a run.
pub fn render(outcome: &Outcome, color: bool) -> String {
    let verb = if outcome.written {
        "Updated"
    } else {
        "Would update"
    };
    let mut output = format!(
        "{} {}\n",
        palette::paint(verb, palette::heading(), color),
        palette::paint(&paths::display_path(&outcome.path), palette::path(), color)
    );
    for resolution in &outcome.resolutions {
        output.push_str(&render_line(resolution, color));
    }
    output
}

/// Render the difference between the loaded file and the resolved catalog.
pub fn render_diff(outcome: &Outcome, color: bool) -> String {
    let previous = outcome.previous.as_deref().unwrap_or_default();
    if previous == outcome.contents {
        return "No changes.\n".to_string();
    }

    let label = paths::display_path(&outcome.path);
    let resolved = format!("{label} (resolved)");
    let diff = diff::unified_diff(&label, &resolved, previous, &outcome.contents);
    diff::colorize_diff(&diff, color)
}
