//! Entity models (all tenant-scoped)

pub mod actor;
pub mod category;
pub mod dining_table;
pub mod invoice;
pub mod item_option_group;
pub mod menu_item;
pub mod menu_option;
pub mod menu_variant;
pub mod option_group;
pub mod order;
pub mod qr_token;

pub use actor::Actor;
pub use category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use invoice::{DiscountType, Invoice, InvoiceStatus, Payment};
pub use item_option_group::ItemOptionGroup;
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemVariantPayload};
pub use menu_option::{MenuOption, MenuOptionCreate, MenuOptionUpdate};
pub use menu_variant::{MenuVariant, MenuVariantCreate, MenuVariantUpdate};
pub use option_group::{OptionGroup, OptionGroupCreate, OptionGroupUpdate};
pub use order::{Order, OrderLine, OrderStatus, OrderTotals, OptionSnapshot};
pub use qr_token::TableQrToken;
