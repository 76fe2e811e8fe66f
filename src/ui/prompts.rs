//! Interactive menus on the terminal.

use console::Term;
use dialoguer::Select;

use crate::error::{Result, ScaffoldorError};

use super::SelectMenu;

/// Show `menu` on `term` and return the value of the picked option.
pub fn select_on(menu: &SelectMenu, term: &Term) -> Result<String> {
    if menu.options.is_empty() {
        return Err(ScaffoldorError::Other(anyhow::anyhow!(
            "Nothing to choose from for '{}'",
            menu.key
        )));
    }

    let labels: Vec<_> = menu.options.iter().map(|o| o.label.as_str()).collect();

    let picked = Select::new()
        .with_prompt(&menu.question)
        .items(&labels)
        .default(menu.default_index())
        .interact_on(term)
        .map_err(|e| ScaffoldorError::Io(e.into()))?;

    Ok(menu.options[picked].value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_menu_is_rejected_before_drawing() {
        let menu = SelectMenu::new("package_manager", "Which?", Vec::<(String, String)>::new());

        let err = select_on(&menu, &Term::stdout()).unwrap_err();

        assert!(err.to_string().contains("package_manager"));
    }
}
