//! Shared display helpers for template listings.
//!
//! Used by `list`, `search` and the scaffold not-found diagnostics so every
//! template renders the same way.

use crate::error::{Result, ScaffoldorError};
use crate::registry::{Framework, TemplateEntry, Tier};
use crate::ui::theme::ScaffoldorTheme;
use crate::ui::UserInterface;

/// Tier badge text.
pub fn tier_badge(tier: Tier) -> &'static str {
    match tier {
        Tier::Free => "[FREE]",
        Tier::Premium => "[PREMIUM]",
    }
}

/// Print one template as a block of lines.
pub fn show_template_item(ui: &mut dyn UserInterface, entry: &TemplateEntry, theme: &ScaffoldorTheme) {
    let template = &entry.template;

    let badge = match template.tier {
        Tier::Free => theme.free.apply_to(tier_badge(template.tier)),
        Tier::Premium => theme.premium.apply_to(tier_badge(template.tier)),
    };
    ui.message(&format!(
        "  {} {}",
        theme.reference.apply_to(format!("@{}/{}", entry.author, template.slug)),
        badge
    ));

    let framework = if template.framework == Framework::Other {
        String::new()
    } else {
        format!(" {}", theme.framework.apply_to(format!("({})", template.framework)))
    };
    let description = template.description.as_deref().unwrap_or("No description");
    ui.message(&format!(
        "    {}{} {}",
        theme.dim.apply_to(format!("[{}]", template.template_type)),
        framework,
        description
    ));

    if !template.tags.is_empty() {
        ui.message(&format!(
            "    Tags: {}",
            theme.tag.apply_to(template.tags.join(", "))
        ));
    }

    let author = match &template.author.github {
        Some(handle) => format!("{} (@{})", template.author.name, handle),
        None => template.author.name.clone(),
    };
    ui.message(&format!("    {}", theme.dim.apply_to(format!("Author: {}", author))));
}

/// Print a header, every entry, and the total.
pub fn show_template_list(
    ui: &mut dyn UserInterface,
    title: &str,
    entries: &[TemplateEntry],
    theme: &ScaffoldorTheme,
) {
    ui.show_header(title);
    for entry in entries {
        show_template_item(ui, entry, theme);
        ui.message("");
    }
    ui.message(&format!("Total: {} template(s)", entries.len()));
}

/// Print entries as pretty JSON on the machine-readable channel.
pub fn show_template_json(ui: &mut dyn UserInterface, entries: &[TemplateEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| ScaffoldorError::Other(anyhow::anyhow!("Failed to serialize templates: {}", e)))?;
    ui.output(&json);
    Ok(())
}
