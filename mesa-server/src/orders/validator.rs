//! Menu constraint validator
//!
//! Resolves requested selections against the live catalog, enforces
//! availability and option-group selection bounds, and prices each line.
//! Validation is fail-fast: the first violation wins.
//!
//! The catalog is loaded in a fixed number of batched queries into a
//! [`CatalogSnapshot`]; [`price_lines`] is then a pure function of that
//! snapshot, shared verbatim by the staff and public order paths.

use std::collections::{HashMap, HashSet};

use shared::models::{
    MenuItem, MenuOption, MenuVariant, OptionGroup, OptionSnapshot, OrderLine, OrderTotals,
};
use shared::request::OrderLineInput;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, item_option_group};
use crate::utils::{AppError, AppResult, round_money};

/// Point-in-time view of every catalog entity referenced by a request
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    pub items: HashMap<String, MenuItem>,
    pub variants: HashMap<String, MenuVariant>,
    pub options: HashMap<String, MenuOption>,
    pub groups: HashMap<String, OptionGroup>,
    /// item id -> attached group ids
    pub item_groups: HashMap<String, Vec<String>>,
}

/// Validator output: priced lines plus order-level totals
#[derive(Debug)]
pub struct PricedLines {
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
}

/// Validate and price a full request against the current catalog
pub async fn validate_and_price(
    pool: &SqlitePool,
    tenant_id: &str,
    inputs: &[OrderLineInput],
) -> AppResult<PricedLines> {
    if inputs.is_empty() {
        return Err(AppError::validation("items must be a non-empty array"));
    }
    let snapshot = load_snapshot(pool, tenant_id, inputs).await?;
    price_lines(&snapshot, inputs)
}

/// Batch-fetch every referenced item, variant, option, the attachments of
/// the referenced items, and the groups those reference. Bounded at five
/// queries regardless of line count.
async fn load_snapshot(
    pool: &SqlitePool,
    tenant_id: &str,
    inputs: &[OrderLineInput],
) -> AppResult<CatalogSnapshot> {
    let item_ids = unique(inputs.iter().map(|l| l.item_id.clone()));
    let variant_ids = unique(inputs.iter().map(|l| l.variant_id.clone()));
    let option_ids = unique(inputs.iter().flat_map(|l| l.option_ids.iter().cloned()));

    let items =
        fetch_in::<MenuItem>(pool, "SELECT * FROM menu_item", tenant_id, &item_ids).await?;
    let variants =
        fetch_in::<MenuVariant>(pool, "SELECT * FROM menu_variant", tenant_id, &variant_ids)
            .await?;
    let options =
        fetch_in::<MenuOption>(pool, "SELECT * FROM menu_option", tenant_id, &option_ids).await?;
    let attachments = item_option_group::find_for_items(pool, tenant_id, &item_ids).await?;

    let mut item_groups: HashMap<String, Vec<String>> = HashMap::new();
    for attachment in &attachments {
        item_groups
            .entry(attachment.item_id.clone())
            .or_default()
            .push(attachment.group_id.clone());
    }

    // Groups referenced either by an attachment or by a selected option
    let group_ids = unique(
        attachments
            .iter()
            .map(|a| a.group_id.clone())
            .chain(options.iter().map(|o| o.group_id.clone())),
    );
    let groups =
        fetch_in::<OptionGroup>(pool, "SELECT * FROM option_group", tenant_id, &group_ids).await?;

    Ok(CatalogSnapshot {
        items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        variants: variants.into_iter().map(|v| (v.id.clone(), v)).collect(),
        options: options.into_iter().map(|o| (o.id.clone(), o)).collect(),
        groups: groups.into_iter().map(|g| (g.id.clone(), g)).collect(),
        item_groups,
    })
}

fn unique(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(id.clone())).collect()
}

async fn fetch_in<T>(
    pool: &SqlitePool,
    select: &str,
    tenant_id: &str,
    ids: &[String],
) -> RepoResult<Vec<T>>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = sqlx::QueryBuilder::new(select);
    builder.push(" WHERE tenant_id = ");
    builder.push_bind(tenant_id);
    builder.push(" AND id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows = builder.build_query_as::<T>().fetch_all(pool).await?;
    Ok(rows)
}

/// Validate and price against an already-loaded snapshot. Pure; no I/O.
pub fn price_lines(
    snapshot: &CatalogSnapshot,
    inputs: &[OrderLineInput],
) -> AppResult<PricedLines> {
    if inputs.is_empty() {
        return Err(AppError::validation("items must be a non-empty array"));
    }

    for input in inputs {
        if input.quantity < 1 {
            return Err(AppError::validation("quantity must be a positive integer"));
        }
    }

    // Existence before availability: a request that mixes both problems
    // reads as missing, not as unavailable.
    if inputs.iter().any(|l| !snapshot.items.contains_key(&l.item_id)) {
        return Err(AppError::validation("one or more items not found"));
    }
    if inputs.iter().any(|l| !snapshot.variants.contains_key(&l.variant_id)) {
        return Err(AppError::validation("one or more variants not found"));
    }

    for id in unique(inputs.iter().map(|l| l.item_id.clone())) {
        if let Some(item) = snapshot.items.get(&id) {
            if !item.is_available {
                return Err(AppError::validation(format!(
                    "item not available: {}",
                    item.name
                )));
            }
        }
    }
    for id in unique(inputs.iter().map(|l| l.variant_id.clone())) {
        if let Some(variant) = snapshot.variants.get(&id) {
            if !variant.is_available {
                return Err(AppError::validation(format!(
                    "variant not available: {}",
                    variant.name
                )));
            }
        }
    }

    let mut lines = Vec::with_capacity(inputs.len());

    for input in inputs {
        let item = snapshot
            .items
            .get(&input.item_id)
            .ok_or_else(|| AppError::validation("one or more items not found"))?;
        let variant = snapshot
            .variants
            .get(&input.variant_id)
            .ok_or_else(|| AppError::validation("one or more variants not found"))?;

        if variant.item_id != item.id {
            return Err(AppError::validation(format!(
                "variant does not belong to item: {}",
                item.name
            )));
        }

        // Every attached group binds the line. Deactivating a group hides
        // it from the menu but does not relax existing attachments.
        let mut attached: Vec<&OptionGroup> = Vec::new();
        if let Some(group_ids) = snapshot.item_groups.get(&item.id) {
            for group_id in group_ids {
                let group = snapshot.groups.get(group_id).ok_or_else(|| {
                    AppError::validation("option group not found for selected item")
                })?;
                attached.push(group);
            }
        }

        let option_ids = unique(input.option_ids.iter().cloned());
        let mut selected = Vec::with_capacity(option_ids.len());
        let mut counts: HashMap<&str, i64> = HashMap::new();

        for option_id in &option_ids {
            let option = snapshot
                .options
                .get(option_id)
                .ok_or_else(|| AppError::validation("one or more options not found"))?;
            if !option.is_available {
                return Err(AppError::validation(format!(
                    "option not available: {}",
                    option.name
                )));
            }
            if !attached.iter().any(|g| g.id == option.group_id) {
                return Err(AppError::validation(format!(
                    "option not allowed for item: {}",
                    item.name
                )));
            }
            *counts.entry(option.group_id.as_str()).or_insert(0) += 1;
            selected.push(option);
        }

        // Every attached group is bounded, selected from or not
        for group in &attached {
            let count = counts.get(group.id.as_str()).copied().unwrap_or(0);
            if count < group.min_select {
                return Err(AppError::validation(format!(
                    "minSelect not satisfied for group {}",
                    group.name
                )));
            }
            if count > group.max_select {
                return Err(AppError::validation(format!(
                    "maxSelect exceeded for group {}",
                    group.name
                )));
            }
        }

        let options_price: f64 = selected.iter().map(|o| o.price).sum();
        let unit_price = round_money(variant.price + options_price);
        let line_sub_total = round_money(unit_price * input.quantity as f64);
        let line_tax = round_money(line_sub_total * item.tax_percentage / 100.0);
        let line_total = round_money(line_sub_total + line_tax);

        lines.push(OrderLine {
            item_id: item.id.clone(),
            variant_id: variant.id.clone(),
            name: item.name.clone(),
            variant_name: variant.name.clone(),
            quantity: input.quantity,
            unit_price,
            options: selected
                .iter()
                .map(|o| OptionSnapshot {
                    option_id: o.id.clone(),
                    name: o.name.clone(),
                    price: o.price,
                })
                .collect(),
            note: input.note.clone().unwrap_or_default(),
            tax_percentage: item.tax_percentage,
            line_sub_total,
            line_tax,
            line_total,
        });
    }

    let sub_total = round_money(lines.iter().map(|l| l.line_sub_total).sum());
    let tax_total = round_money(lines.iter().map(|l| l.line_tax).sum());
    let grand_total = round_money(sub_total + tax_total);

    Ok(PricedLines {
        lines,
        totals: OrderTotals {
            sub_total,
            tax_total,
            grand_total,
        },
    })
}
