#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod display;

use anyhow::Result;
use barter_market::{Item, ItemSet, MarketState, OfferSortBy, User, UserUID};
use chrono::Utc;
use config::{create_initial_config_file, read_config, Config};
use directories::ProjectDirs;
use display::localize;
use std::sync::Arc;
use tokio::fs::create_dir_all;
use tracing_subscriber::{filter, prelude::*};

pub(crate) fn error(message: &str) -> ! {
    tracing::error!(message);
    tracing::error!("Exiting due to previous error...");

    std::process::exit(-1);
}

fn project_dirs() -> ProjectDirs {
    let Some(project_dirs) = ProjectDirs::from("", "", "barter-market") else {
        error("Could not find valid directory for project files.");
    };

    project_dirs
}

async fn init_logs() -> Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().compact();

    let data_dir_path = project_dirs().data_dir().join("logs");
    create_dir_all(&data_dir_path).await?;

    let datetime = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);

    let debug_file =
        tokio::fs::File::create(data_dir_path.join(format!("debug-{datetime}.log")))
            .await?
            .into_std()
            .await;

    let debug_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(false)
        .with_writer(Arc::new(debug_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log),
        )
        .init();

    Ok(())
}

async fn init_config() -> Result<Config> {
    let project_dirs = project_dirs();
    let config_dir = project_dirs.config_dir();

    if !config_dir.join("config.json").exists() {
        tracing::warn!(
            "Config not found: Creating {}...",
            config_dir.to_string_lossy().to_string()
        );

        create_dir_all(config_dir).await?;
        create_initial_config_file(config_dir).await?;
    }

    read_config(config_dir).await
}

fn print_user(market: &MarketState, user_id: UserUID, config: &Config) {
    let Some(user) = market.get_user(user_id) else {
        tracing::error!("User {user_id} vanished from the market");
        return;
    };

    let mut items = user.get_items().iter().collect::<Vec<_>>();
    items.sort();

    let language = config.get_language();
    let names = items
        .iter()
        .map(|item| {
            let name = localize(item.get_name(), language);

            if config.get_show_descriptions() && !item.get_description().is_empty() {
                format!("{name} ({})", localize(item.get_description(), language))
            } else {
                name.to_owned()
            }
        })
        .collect::<Vec<_>>();

    println!(
        "{}: {}",
        localize("Items held by/所持アイテム", language),
        user.get_username()
    );
    println!("  {names:?}");
}

fn run_demo(config: &Config) -> Result<()> {
    let language = config.get_language();

    let book = Item::new("Book/本", "A mystery novel/ミステリー小説");
    let guitar = Item::new("Guitar/ギター", "An acoustic guitar/アコースティックギター");
    let lamp = Item::new("Lamp/ランプ", "A vintage lamp/ビンテージのランプ");
    let pen = Item::new("Pen/ペン", "A fancy fountain pen/高級万年筆");

    let market = MarketState::new();
    let alice = market.add_user(User::new("alice").with_items_added(&ItemSet::from([
        book.clone(),
        pen.clone(),
    ])));
    let bob = market.add_user(User::holding(
        "bob",
        ItemSet::from([guitar.clone(), lamp.clone()]),
    ));

    // Alice trades her book and pen for Bob's guitar and lamp.
    let trade = market.propose(
        alice,
        bob,
        ItemSet::from([book, pen]),
        ItemSet::from([guitar, lamp.clone()]),
    )?;
    let accepted = market.accept(trade)?;

    tracing::debug!("Accepted offer: {}", serde_json::to_string(&accepted)?);

    println!(
        "{}: {}",
        localize("Offer status/オファー状態", language),
        accepted.get_status()
    );
    print_user(&market, alice, config);
    print_user(&market, bob, config);

    // Bob wants the lamp back for nothing; Alice says no.
    let rematch = market.propose(
        bob,
        alice,
        ItemSet::new(),
        ItemSet::from([lamp]),
    )?;
    let declined = market.decline(rematch)?;

    println!(
        "{}: {}",
        localize("Offer status/オファー状態", language),
        declined.get_status()
    );

    for (offer_id, offer) in market.offers_for_user(alice, OfferSortBy::DateAscending) {
        tracing::info!("Offer {offer_id} is {}", offer.get_status());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logs().await?;
    let config = init_config().await?;

    run_demo(&config)
}
