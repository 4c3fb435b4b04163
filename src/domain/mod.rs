//! Trade-up float mapping and price board logic lives here.

pub mod app_state;
pub mod catalog;
pub mod pricing;
pub mod wear;

pub use app_state::{FamilyState, ItemKind};
pub use catalog::{find_family, families, PriceTierPolicy, TradeUpFamily};
pub use pricing::{
    apply_quotes, average_price, break_even_material_price, sorted_by_price, PricedItem,
    RefreshSummary,
};
pub use wear::{MaterialSelection, RangeMode, Tier, WearEngine};
