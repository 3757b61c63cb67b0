use std::io::{self, Write};

use clap::Args;
use rusty_money::iso;
use storefront_cart::{
    catalog::{Catalog, Restaurant},
    pricing::format_amount,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restaurant id; lists all restaurants when omitted
    restaurant: Option<String>,
}

pub(crate) fn run(args: &MenuArgs) -> Result<(), String> {
    let catalog = Catalog::demo().map_err(|error| format!("failed to load catalog: {error}"))?;
    let mut out = io::stdout().lock();

    let written = match &args.restaurant {
        Some(id) => {
            let restaurant = catalog.restaurant(id).map_err(|error| error.to_string())?;
            write_menu(&mut out, restaurant)
        }
        None => write_restaurants(&mut out, &catalog),
    };

    written.map_err(|error| format!("failed to write menu: {error}"))
}

fn write_restaurants(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Restaurant", "Cuisine", "Rating", "Delivery", ""]);

    for restaurant in &catalog.restaurants {
        builder.push_record([
            restaurant.id.clone(),
            restaurant.name.clone(),
            restaurant.cuisine.clone(),
            restaurant.rating.to_string(),
            restaurant.delivery_time.clone(),
            if restaurant.featured {
                "featured".to_string()
            } else {
                String::new()
            },
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}

fn write_menu(out: &mut impl Write, restaurant: &Restaurant) -> io::Result<()> {
    writeln!(out, "{} ({})", restaurant.name, restaurant.cuisine)?;

    if restaurant.menu.is_empty() {
        return writeln!(out, "No menu items available yet");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Price", "Options"]);

    for item in &restaurant.menu {
        let options = item
            .customizations
            .iter()
            .map(|category| {
                let choices: Vec<String> = category
                    .options
                    .iter()
                    .map(|option| {
                        if option.price.is_zero() {
                            option.id.clone()
                        } else {
                            format!("{} +{}", option.id, format_amount(option.price, iso::USD))
                        }
                    })
                    .collect();

                let marker = match (category.required, category.multiple) {
                    (true, _) => " (required)",
                    (false, true) => " (any)",
                    (false, false) => "",
                };

                format!("{}{marker}: {}", category.id, choices.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            item.id.clone(),
            item.name.clone(),
            format_amount(item.price, iso::USD),
            options,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "{table}")
}
