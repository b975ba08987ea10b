use std::fmt;

use anyhow::Result;
use forecast_core::{App, LocationInput, RetrieverState};
use inquire::{InquireError, Select, Text};

use crate::render::{self, LocationRow};

#[derive(Debug, Clone, Copy)]
enum MainMenu {
    Forecast,
    Locations,
    Quit,
}

impl fmt::Display for MainMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MainMenu::Forecast => "Forecast",
            MainMenu::Locations => "Locations",
            MainMenu::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum LocationsAction {
    Add,
    Remove,
    Back,
}

impl fmt::Display for LocationsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocationsAction::Add => "Add a new location",
            LocationsAction::Remove => "Remove a location",
            LocationsAction::Back => "Back",
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum ForecastAction {
    Choose,
    Fetch,
    Back,
}

impl fmt::Display for ForecastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForecastAction::Choose => "Choose a location",
            ForecastAction::Fetch => "Get weather",
            ForecastAction::Back => "Back",
        })
    }
}

/// Esc and Ctrl-C both mean "leave this prompt".
fn skippable<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn run(mut app: App) -> Result<()> {
    println!("Weather App");

    loop {
        let menu = vec![MainMenu::Forecast, MainMenu::Locations, MainMenu::Quit];
        match skippable(Select::new("Where to?", menu).prompt_skippable())? {
            Some(MainMenu::Forecast) => forecast_screen(&mut app).await?,
            Some(MainMenu::Locations) => locations_screen(&mut app)?,
            Some(MainMenu::Quit) | None => break,
        }
    }

    Ok(())
}

fn rows(app: &App) -> Vec<LocationRow> {
    let selected = app.retriever().selected().map(|loc| loc.name());
    app.locations()
        .iter()
        .map(|loc| LocationRow { location: loc.clone(), active: Some(loc.name()) == selected })
        .collect()
}

fn print_locations(app: &App, empty_message: &str) {
    println!("\nLocations:");
    if app.locations().is_empty() {
        println!("{empty_message}");
        return;
    }
    for row in rows(app) {
        println!("  {row}");
    }
}

fn locations_screen(app: &mut App) -> Result<()> {
    loop {
        print_locations(app, render::EMPTY_LOCATIONS);

        let actions = vec![LocationsAction::Add, LocationsAction::Remove, LocationsAction::Back];
        match skippable(Select::new("Locations", actions).prompt_skippable())? {
            Some(LocationsAction::Add) => add_location(app)?,
            Some(LocationsAction::Remove) => remove_location(app)?,
            Some(LocationsAction::Back) | None => return Ok(()),
        }
    }
}

fn add_location(app: &mut App) -> Result<()> {
    let Some(name) = skippable(Text::new("Name:").prompt_skippable())? else {
        return Ok(());
    };
    let Some(lat) = skippable(Text::new("Latitude:").prompt_skippable())? else {
        return Ok(());
    };
    let Some(lon) = skippable(Text::new("Longitude:").prompt_skippable())? else {
        return Ok(());
    };

    let errors = app.add_location(LocationInput::from_raw(&name, &lat, &lon));
    if errors.is_valid() {
        println!("Saved location {}.", name.trim());
    } else {
        println!("Location was not saved:");
        for line in render::field_errors(&errors) {
            println!("{line}");
        }
    }
    Ok(())
}

fn remove_location(app: &mut App) -> Result<()> {
    if app.locations().is_empty() {
        return Ok(());
    }

    if let Some(row) = skippable(Select::new("Remove which location?", rows(app)).prompt_skippable())? {
        app.remove_location(row.location.name());
    }
    Ok(())
}

async fn forecast_screen(app: &mut App) -> Result<()> {
    loop {
        print_locations(app, render::EMPTY_FORECAST_LOCATIONS);

        let actions = vec![ForecastAction::Choose, ForecastAction::Fetch, ForecastAction::Back];
        match skippable(Select::new("Forecast", actions).prompt_skippable())? {
            Some(ForecastAction::Choose) => choose_location(app)?,
            Some(ForecastAction::Fetch) => fetch_weather(app).await,
            Some(ForecastAction::Back) | None => return Ok(()),
        }
    }
}

fn choose_location(app: &mut App) -> Result<()> {
    if app.locations().is_empty() {
        return Ok(());
    }

    if let Some(row) = skippable(Select::new("Choose a location", rows(app)).prompt_skippable())? {
        app.select(row.location.name());
    }
    Ok(())
}

async fn fetch_weather(app: &mut App) {
    if app.retriever().selected().is_some() {
        println!("{}", render::LOADING);
    }
    app.fetch().await;

    let retriever = app.retriever();
    match retriever.state() {
        RetrieverState::Success(summary) => {
            println!("\n{}\n", render::summary_card(summary, retriever.image_url()));
        }
        RetrieverState::Failure(message) => println!("\n[!] {message}\n"),
        RetrieverState::Idle | RetrieverState::Loading => {}
    }
}
