//! Cart State Manager
//!
//! Owns the cart lines and drawer state for one session. Every mutating command
//! leaves the invariants intact (unique ids, quantities of at least one),
//! writes a snapshot to the store before returning, and then reports what it
//! did to the observer. Commands never fail: storage and notification problems
//! are logged and swallowed.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    config::{CartConfig, DEFAULT_STORAGE_KEY},
    drawer::Drawer,
    events::{CartEvent, CartObserver, NoopObserver},
    lines::CartLine,
    pricing::{self, CartTotals, DeliveryPolicy},
    storage::CartStore,
};

/// How the cart was populated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing was stored; the cart starts empty.
    Fresh,

    /// A snapshot was restored.
    Restored {
        /// Number of lines after restoring
        lines: usize,
    },

    /// A snapshot existed but could not be parsed; the cart starts empty.
    Corrupt,

    /// The store could not be read; the cart starts empty.
    Unavailable,
}

impl Hydration {
    /// Whether a previous cart was recovered.
    pub fn is_restored(self) -> bool {
        matches!(self, Hydration::Restored { .. })
    }
}

/// The shopping cart for one session.
#[derive(Debug)]
pub struct CartManager<S: CartStore, O: CartObserver = NoopObserver> {
    lines: Vec<CartLine>,
    drawer: Drawer,
    hydration: Hydration,
    store: S,
    observer: O,
    storage_key: String,
    policy: DeliveryPolicy,
    currency: &'static Currency,
}

impl<S: CartStore> CartManager<S, NoopObserver> {
    /// Opens the cart with default settings and no observer.
    pub fn new(store: S) -> Self {
        Self::with_observer(store, NoopObserver)
    }
}

impl<S: CartStore, O: CartObserver> CartManager<S, O> {
    /// Opens the cart with default settings.
    pub fn with_observer(store: S, observer: O) -> Self {
        Self::open(
            store,
            observer,
            DEFAULT_STORAGE_KEY.to_string(),
            DeliveryPolicy::default(),
            iso::USD,
        )
    }

    /// Opens the cart using the given configuration.
    ///
    /// An unsupported currency falls back to USD; [`CartConfig::from_yaml_str`]
    /// already rejects those.
    pub fn with_config(store: S, observer: O, config: &CartConfig) -> Self {
        let currency = config.currency().unwrap_or_else(|error| {
            warn!(%error, "falling back to USD");
            iso::USD
        });

        Self::open(
            store,
            observer,
            config.storage_key.clone(),
            config.delivery,
            currency,
        )
    }

    fn open(
        store: S,
        observer: O,
        storage_key: String,
        policy: DeliveryPolicy,
        currency: &'static Currency,
    ) -> Self {
        let (lines, hydration) = hydrate(&store, &storage_key);

        Self {
            lines,
            drawer: Drawer::default(),
            hydration,
            store,
            observer,
            storage_key,
            policy,
            currency,
        }
    }

    /// Adds a line, merging it into an existing line with the same id.
    ///
    /// On merge only the quantity changes; every other field of the existing line
    /// is kept. Opens the drawer.
    ///
    /// A line with a negative unit price is refused: it is logged and the cart,
    /// drawer and store are left untouched.
    pub fn add_item(&mut self, line: CartLine) {
        if line.unit_price < Decimal::ZERO {
            warn!(id = %line.id, price = %line.unit_price, "refusing line with negative price");
            return;
        }

        let event = if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity.get());

            debug!(id = %existing.id, quantity = existing.quantity.get(), "merged cart line");

            CartEvent::Merged {
                id: existing.id.clone(),
                name: existing.name.clone(),
                quantity: existing.quantity.get(),
            }
        } else {
            debug!(id = %line.id, quantity = line.quantity.get(), "added cart line");

            let event = CartEvent::Added {
                id: line.id.clone(),
                name: line.name.clone(),
            };
            self.lines.push(line);

            event
        };

        self.drawer.open();
        self.persist();
        self.emit(&event);
    }

    /// Sets a line's quantity. Zero or less removes the line instead.
    ///
    /// Unknown ids are ignored, though the cart is still persisted.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = NonZeroU32::new(u32::try_from(quantity).unwrap_or(u32::MAX))
            .unwrap_or(NonZeroU32::MIN);

        let event = self.lines.iter_mut().find(|l| l.id == id).map(|line| {
            line.quantity = quantity;

            CartEvent::QuantityChanged {
                id: line.id.clone(),
                quantity: quantity.get(),
            }
        });

        debug!(id, quantity = quantity.get(), found = event.is_some(), "updated cart line");

        self.persist();

        if let Some(event) = event {
            self.emit(&event);
        }
    }

    /// Removes the line with the given id, returning it if it was present.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.id == id);
        let removed = index.map(|index| self.lines.remove(index));

        debug!(id, found = removed.is_some(), "removed cart line");

        self.persist();

        if let Some(line) = &removed {
            self.emit(&CartEvent::Removed {
                id: line.id.clone(),
                name: line.name.clone(),
            });
        }

        removed
    }

    /// Removes every line.
    pub fn clear_cart(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");

        self.lines.clear();
        self.persist();
        self.emit(&CartEvent::Cleared);
    }

    /// Shows the drawer.
    pub fn open_drawer(&mut self) {
        self.drawer.open();
    }

    /// Hides the drawer.
    pub fn close_drawer(&mut self) {
        self.drawer.close();
    }

    /// Flips the drawer.
    pub fn toggle_drawer(&mut self) {
        self.drawer.toggle();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line with the given id.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drawer state
    pub fn drawer(&self) -> Drawer {
        self.drawer
    }

    /// Whether the drawer is shown.
    pub fn is_drawer_open(&self) -> bool {
        self.drawer.is_open()
    }

    /// Sum of quantities, for badge counters.
    pub fn item_count(&self) -> u64 {
        pricing::item_count(&self.lines)
    }

    /// Sum of `unit_price × quantity`.
    pub fn subtotal(&self) -> Decimal {
        pricing::subtotal(&self.lines)
    }

    /// Delivery fee for the current subtotal.
    pub fn delivery_fee(&self) -> Decimal {
        self.policy.fee_for(self.subtotal())
    }

    /// Subtotal plus delivery fee.
    pub fn total(&self) -> Decimal {
        self.totals().total
    }

    /// All derived totals at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_lines(&self.lines, &self.policy)
    }

    /// Distinct restaurant ids, in the order they first appear.
    ///
    /// Mixed-restaurant carts are allowed; callers wanting a single-restaurant
    /// rule can check this.
    pub fn restaurants(&self) -> SmallVec<[&str; 2]> {
        let mut restaurants: SmallVec<[&str; 2]> = SmallVec::new();

        for line in &self.lines {
            if !restaurants.contains(&line.restaurant_id.as_str()) {
                restaurants.push(&line.restaurant_id);
            }
        }

        restaurants
    }

    /// Display currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Delivery policy in effect
    pub fn delivery_policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// How the cart was populated at startup.
    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// The attached observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The attached observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Ends the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let snapshot = match serde_json::to_string(&self.lines) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to serialize cart");
                return;
            }
        };

        if let Err(error) = self.store.save(&self.storage_key, &snapshot) {
            warn!(%error, key = %self.storage_key, "failed to persist cart");
        }
    }

    fn emit(&mut self, event: &CartEvent) {
        if let Err(error) = self.observer.on_event(event) {
            warn!(%error, message = %event.message(), "cart notification failed");
        }
    }
}

#[tracing::instrument(level = "debug", skip(store))]
fn hydrate<S: CartStore>(store: &S, key: &str) -> (Vec<CartLine>, Hydration) {
    let snapshot = match store.load(key) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return (Vec::new(), Hydration::Fresh),
        Err(error) => {
            warn!(%error, "failed to read stored cart");
            return (Vec::new(), Hydration::Unavailable);
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&snapshot) {
        Ok(stored) => {
            let lines = dedupe(stored);
            debug!(lines = lines.len(), "restored cart");

            let hydration = Hydration::Restored { lines: lines.len() };
            (lines, hydration)
        }
        Err(error) => {
            warn!(%error, "failed to parse stored cart");
            (Vec::new(), Hydration::Corrupt)
        }
    }
}

/// Merges lines sharing an id, first occurrence wins.
fn dedupe(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());

    for line in stored {
        match lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity.get());
            }
            None => lines.push(line),
        }
    }

    lines
}
