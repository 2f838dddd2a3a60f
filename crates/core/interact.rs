use dialoguer::{Confirm, Input};
use eyre::{eyre, Context, Result};
use log::warn;
use matfill::{
    form::{Field, MemoryForm, SearchControl},
    Config, Controller, Event, Key,
};

use crate::commands::new_controller;

type Client = reqwest::blocking::Client;

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_input(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

fn user_confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .wrap_err_with(|| eyre!("User confirmation cancelled"))
}

/// Material types that have a panel, e.g. `book` for the `book-add` panel.
fn material_types(config: &Config) -> Vec<&str> {
    config
        .panels
        .iter()
        .filter_map(|panel| panel.strip_suffix("-add"))
        .collect()
}

pub fn run_session(config: &Config) -> Result<String> {
    let types = material_types(config);
    if types.is_empty() {
        return Err(eyre!("No material panels are configured"));
    }

    let mut controller = new_controller(config);

    loop {
        let selection = user_select("Material type", &types)?;
        controller.input(Field::TypeSelector, types[selection])?;

        match types[selection] {
            "book" => search(&mut controller, "ISBN", Field::BookIsbn, None)?,
            "paper" => {
                if user_select("Search by", &["DOI", "ISBN"])? == 0 {
                    search(&mut controller, "DOI", Field::PaperDoi, None)?;
                } else {
                    search(
                        &mut controller,
                        "ISBN",
                        Field::BookIsbn,
                        Some(SearchControl::PaperIsbn),
                    )?;
                }
            }
            other => println!("There is no lookup for '{other}' material"),
        }

        println!("{}", controller.form());

        if !user_confirm("Search again?")? {
            break;
        }
    }

    Ok(controller.into_form().to_string())
}

/// Types the identifier into `field` then searches, with Enter or with a click on `control`.
///
/// Lookup failures are reported and leave the session running, the user can just search again.
fn search(
    controller: &mut Controller<Client, MemoryForm>,
    prompt: &str,
    field: Field,
    control: Option<SearchControl>,
) -> Result<()> {
    let value = user_input(prompt)?;
    controller.input(field, &value)?;

    let event = control.map_or(Event::KeyPressed(field, Key::Enter), Event::Clicked);
    if let Err(err) = controller.dispatch(event) {
        warn!("Lookup of '{value}' failed: {err}");
    }
    Ok(())
}

#[test]
fn material_types_follow_panels() {
    let config = Config {
        panels: vec![
            "book-add".to_owned(),
            "paper-add".to_owned(),
            "sidebar".to_owned(),
        ],
        ..Config::default()
    };

    assert_eq!(vec!["book", "paper"], material_types(&config));
}
