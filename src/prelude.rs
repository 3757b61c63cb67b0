//! Storefront Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, MenuItem, Restaurant},
    config::{CartConfig, ConfigError},
    drawer::Drawer,
    events::{CartEvent, CartObserver, EventLog, Notice, NoopObserver, NotifyError, TracingObserver},
    lines::{CartLine, Customizations, Selection, variant_id},
    manager::{CartManager, Hydration},
    pricing::{CartTotals, DeliveryPolicy, PriceError, format_amount},
    receipt::{ReceiptError, write_receipt},
    storage::{CartStore, FileStore, MemoryStore, StoreError},
};
