use std::num::NonZeroU32;

use clap::Args;
use storefront_cart::{
    catalog::Catalog,
    events::CartObserver,
    lines::{Customizations, Selection},
    manager::CartManager,
    storage::CartStore,
};
use tracing::warn;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Restaurant id
    restaurant: String,

    /// Menu item id
    item: String,

    /// Number of units
    #[arg(short, long, default_value_t = NonZeroU32::MIN)]
    quantity: NonZeroU32,

    /// Customization choice, `category=option` or `category=a,b` for multi-select
    #[arg(short, long = "select", value_parser = parse_selection)]
    selections: Vec<(String, Selection)>,
}

pub(crate) fn run<S: CartStore, O: CartObserver>(
    cart: &mut CartManager<S, O>,
    args: &AddArgs,
) -> Result<(), String> {
    let catalog = Catalog::demo().map_err(|error| format!("failed to load catalog: {error}"))?;
    let restaurant = catalog
        .restaurant(&args.restaurant)
        .map_err(|error| error.to_string())?;
    let item = restaurant
        .item(&args.item)
        .map_err(|error| error.to_string())?;

    let selections: Customizations = args.selections.iter().cloned().collect();

    let line = item
        .configure(restaurant, &selections, args.quantity)
        .map_err(|error| format!("cannot add {}: {error}", item.name))?;

    cart.add_item(line);

    let restaurants = cart.restaurants();
    if restaurants.len() > 1 {
        warn!(
            restaurants = ?restaurants,
            "cart now holds items from more than one restaurant"
        );
    }

    Ok(())
}

fn parse_selection(raw: &str) -> Result<(String, Selection), String> {
    let (category, options) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected category=option, got {raw:?}"))?;

    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in {raw:?}"));
    }

    let options: Vec<String> = options
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect();

    let selection = match options.as_slice() {
        [] => return Err(format!("missing option in {raw:?}")),
        [option] if !raw.contains(',') => Selection::Single(option.clone()),
        _ => Selection::Multiple(options),
    };

    Ok((category.to_string(), selection))
}
