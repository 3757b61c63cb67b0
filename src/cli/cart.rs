use std::io::{self, Write};

use clap::Args;
use storefront_cart::{
    events::CartObserver, manager::CartManager, pricing::format_amount, receipt::write_receipt,
    storage::CartStore,
};
use tracing::warn;

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Cart line id
    id: String,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Cart line id
    id: String,
}

pub(crate) fn update<S: CartStore, O: CartObserver>(
    cart: &mut CartManager<S, O>,
    args: &UpdateArgs,
) {
    cart.update_quantity(&args.id, args.quantity);
}

pub(crate) fn remove<S: CartStore, O: CartObserver>(
    cart: &mut CartManager<S, O>,
    args: &RemoveArgs,
) {
    if cart.remove_item(&args.id).is_none() {
        warn!(id = %args.id, "no cart line with that id");
    }
}

pub(crate) fn show<S: CartStore, O: CartObserver>(cart: &CartManager<S, O>) -> Result<(), String> {
    write_receipt(
        io::stdout().lock(),
        cart.lines(),
        &cart.totals(),
        cart.currency(),
    )
    .map_err(|error| error.to_string())
}

pub(crate) fn checkout<S: CartStore, O: CartObserver>(
    cart: &CartManager<S, O>,
) -> Result<(), String> {
    if cart.is_empty() {
        return Err("cart is empty".to_string());
    }

    show(cart)?;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "\nCheckout for {} is not available in this demo; no payment was taken.",
        format_amount(cart.total(), cart.currency())
    )
    .map_err(|error| error.to_string())
}
