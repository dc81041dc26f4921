//! Schema display formatting

use crate::models::{Category, FieldKind};

fn kind_description(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text { max_len: Some(max) } => format!("text (max {})", max),
        FieldKind::Choice(options) => format!("choice: {}", options.join(" | ")),
        other => other.name().to_string(),
    }
}

/// Format the field list of one category
pub fn format_schema(category: Category) -> String {
    let mut output = format!(
        "{} ({})\n",
        category.label(),
        category.canonical_name()
    );

    let label_width = category
        .schema()
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    for field in category.schema() {
        let source = if field.is_context() { "  [session]" } else { "" };
        output.push_str(&format!(
            "  {:<4} {:<label_width$}  {}{}\n",
            field.code,
            field.label,
            kind_description(&field.kind),
            source,
            label_width = label_width,
        ));
    }

    output
}

/// Format the field lists of every category
pub fn format_all_schemas() -> String {
    Category::ALL
        .iter()
        .map(|c| format_schema(*c))
        .collect::<Vec<_>>()
        .join("\n")
}
