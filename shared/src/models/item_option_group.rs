//! Item and option group attachment

use serde::{Deserialize, Serialize};

/// Attachment record: which option groups apply to which menu item.
/// An item may have zero or more attached groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemOptionGroup {
    pub tenant_id: String,
    pub item_id: String,
    pub group_id: String,
}
