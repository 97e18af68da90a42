use enum_iterator::all;
use inquire::{Confirm, CustomType, Select, Text};
use log::debug;

use crate::{
    form::{OrderForm, SubmitOutcome},
    model::{DesignType, Field, ValidationErrors},
    notify::Notifier,
};

/// Заполняет форму и отправляет заказ, пока он не уйдёт или пользователь
/// не откажется от повторной отправки.
pub fn run(form: &mut OrderForm, notifier: &dyn Notifier) -> anyhow::Result<SubmitOutcome> {
    let fields: Vec<Field> = all::<Field>().collect();
    ask_fields(form, &fields)?;

    debug!("Получатель на момент отправки: {:?}", form.destination());

    loop {
        match form.submit(notifier) {
            SubmitOutcome::Sent => return Ok(SubmitOutcome::Sent),
            SubmitOutcome::Invalid => {
                let fields = fields_to_reask(form.errors());
                ask_fields(form, &fields)?;
            }
            SubmitOutcome::DeliveryFailed => {
                let again = Confirm::new("Отправить заказ ещё раз?")
                    .with_default(true)
                    .prompt()?;

                if !again {
                    return Ok(SubmitOutcome::DeliveryFailed);
                }
            }
        }
    }
}

/// Поля, которые нужно спросить ещё раз, чтобы снять ошибки валидации.
fn fields_to_reask(errors: &ValidationErrors) -> Vec<Field> {
    errors
        .keys()
        .flat_map(|k| k.fields().iter().copied())
        .collect()
}

fn ask_fields(form: &mut OrderForm, fields: &[Field]) -> anyhow::Result<()> {
    for field in fields {
        match field {
            Field::DesignType => ask_design_type(form)?,
            // Спрашивается вместе с типом дизайна.
            Field::CustomDesignType => {}
            Field::Width | Field::Height => ask_dimension(form, *field)?,
            _ => ask_text(form, *field)?,
        }
    }

    Ok(())
}

fn ask_design_type(form: &mut OrderForm) -> anyhow::Result<()> {
    let catalog: Vec<DesignType> = all::<DesignType>().collect();
    let cursor = form
        .draft()
        .design_type
        .and_then(|t| catalog.iter().position(|c| *c == t))
        .unwrap_or_default();
    let error = form.error_for(Field::DesignType).map(str::to_owned);

    let mut prompt = Select::new(Field::DesignType.label(), catalog).with_starting_cursor(cursor);

    if let Some(e) = &error {
        prompt = prompt.with_help_message(e);
    }

    form.toggle_selector();
    let selected = prompt.prompt()?;
    form.select_design_type(selected);

    if form.shows_custom_design_type() {
        ask_text(form, Field::CustomDesignType)?;
    }

    Ok(())
}

fn ask_text(form: &mut OrderForm, field: Field) -> anyhow::Result<()> {
    let current = form.draft().get(field);
    let error = form.error_for(field).map(str::to_owned);

    let mut prompt = Text::new(field.label()).with_initial_value(&current);

    if let Some(e) = &error {
        prompt = prompt.with_help_message(e);
    }

    let value = prompt.prompt()?;

    form.update(field, &value)?;

    Ok(())
}

fn ask_dimension(form: &mut OrderForm, field: Field) -> anyhow::Result<()> {
    let current = form.draft().get(field).parse().unwrap_or_default();
    let error = form.error_for(field).map(str::to_owned);

    let mut prompt = CustomType::<u32>::new(field.label())
        .with_default(current)
        .with_error_message("Введите целое неотрицательное число");

    if let Some(e) = &error {
        prompt = prompt.with_help_message(e);
    }

    let value = prompt.prompt()?;

    form.update(field, &value.to_string())?;

    Ok(())
}
