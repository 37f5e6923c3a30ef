//! Invoice settlement service
//!
//! An invoice is created exactly once per order as an immutable snapshot of
//! its lines and totals. Discount and payment mutate the invoice's own
//! stored values; the source order is never consulted again.

use chrono::Utc;
use shared::models::{Actor, DiscountType, Invoice, InvoiceStatus, OrderStatus, Payment};
use shared::request::{InvoiceCreate, InvoicePay, InvoiceUpdate};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::repository::{RepoError, invoice, order};
use crate::utils::{AppError, AppResult, round_money};

pub struct InvoiceService {
    pool: SqlitePool,
}

/// Discount outcome: (type, value, discount_amount, total_due)
type DiscountOutcome = (Option<DiscountType>, f64, f64, f64);

/// Validate a discount payload and compute the amounts against a grand
/// total. No type and no value means no discount.
fn compute_discount(
    grand_total: f64,
    discount_type: Option<&str>,
    discount_value: Option<f64>,
) -> AppResult<DiscountOutcome> {
    if discount_type.is_none() && discount_value.is_none() {
        return Ok((None, 0.0, 0.0, round_money(grand_total)));
    }

    let kind = discount_type
        .and_then(DiscountType::parse)
        .ok_or_else(|| AppError::validation("discountType must be PERCENTAGE or FLAT"))?;
    let value = discount_value
        .ok_or_else(|| AppError::validation("discountValue must be a number"))?;
    if value < 0.0 {
        return Err(AppError::validation("discountValue must be >= 0"));
    }

    let amount = match kind {
        DiscountType::Percentage => {
            if value > 100.0 {
                return Err(AppError::validation(
                    "discountValue must be between 0 and 100",
                ));
            }
            round_money(grand_total * value / 100.0)
        }
        DiscountType::Flat => round_money(value),
    };

    if amount > grand_total {
        return Err(AppError::validation("discount exceeds grand total"));
    }

    let total_due = round_money(grand_total - amount);
    Ok((Some(kind), value, amount, total_due))
}

impl InvoiceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, tenant_id: &str, id: &str) -> AppResult<Invoice> {
        invoice::find_by_id(&self.pool, tenant_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("invoice not found: {id}")))
    }

    pub async fn list(
        &self,
        tenant_id: &str,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Invoice>, i64)> {
        Ok(invoice::list(&self.pool, tenant_id, status, limit, offset).await?)
    }

    pub async fn create(
        &self,
        tenant_id: &str,
        actor: &Actor,
        data: InvoiceCreate,
    ) -> AppResult<Invoice> {
        let source = order::find_by_id(&self.pool, tenant_id, &data.order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("order not found: {}", data.order_id)))?;

        if source.status == OrderStatus::Cancelled {
            return Err(AppError::conflict("cannot create invoice for cancelled order"));
        }

        // Fast-path check for a friendlier error; the unique index is the
        // real enforcement under concurrency.
        if invoice::find_by_order(&self.pool, tenant_id, &data.order_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("invoice already exists for this order"));
        }

        let (discount_type, discount_value, discount_amount, total_due) = compute_discount(
            source.grand_total,
            data.discount_type.as_deref(),
            data.discount_value,
        )?;

        let now = Utc::now();
        let new_invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.to_string(),
            order_id: source.id.clone(),
            table_id: source.table_id.clone(),
            table_number: source.table_number,
            table_name: source.table_name.clone(),
            status: InvoiceStatus::Issued,
            note: data.note.unwrap_or_default(),
            // Deep copy: later order edits must not propagate
            items: source.items.clone(),
            sub_total: source.sub_total,
            tax_total: source.tax_total,
            grand_total: source.grand_total,
            discount_type,
            discount_value,
            discount_amount,
            total_due,
            payment: None,
            created_by: actor.clone(),
            updated_by: actor.clone(),
            created_at: now,
            updated_at: now,
        };

        match invoice::insert(&self.pool, &new_invoice).await {
            Ok(()) => Ok(new_invoice),
            Err(RepoError::Duplicate(_)) => {
                Err(AppError::conflict("invoice already exists for this order"))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        &self,
        tenant_id: &str,
        id: &str,
        actor: &Actor,
        data: InvoiceUpdate,
    ) -> AppResult<Invoice> {
        let mut existing = self.get(tenant_id, id).await?;

        let discount_change = data.discount_type.is_some() || data.discount_value.is_some();
        if data.note.is_none() && !discount_change {
            return Err(AppError::validation("no updates provided"));
        }

        if discount_change && existing.status.is_settled() {
            return Err(AppError::conflict(
                "cannot update discount for paid or void invoice",
            ));
        }

        if discount_change {
            // The stored discount is not merged in: the request stands on
            // its own and is recomputed against the invoice's grand total.
            let (discount_type, discount_value, discount_amount, total_due) = compute_discount(
                existing.grand_total,
                data.discount_type.as_deref(),
                data.discount_value,
            )?;
            existing.discount_type = discount_type;
            existing.discount_value = discount_value;
            existing.discount_amount = discount_amount;
            existing.total_due = total_due;
        }

        if let Some(note) = data.note {
            // Note edits stay allowed in any status
            existing.note = note;
        }

        existing.updated_by = actor.clone();
        existing.updated_at = Utc::now();

        invoice::save(&self.pool, &existing).await?;
        Ok(existing)
    }

    pub async fn pay(
        &self,
        tenant_id: &str,
        id: &str,
        actor: &Actor,
        data: InvoicePay,
    ) -> AppResult<Invoice> {
        let mut existing = self.get(tenant_id, id).await?;

        match existing.status {
            InvoiceStatus::Paid => return Err(AppError::conflict("invoice already paid")),
            InvoiceStatus::Void => return Err(AppError::conflict("cannot pay a void invoice")),
            InvoiceStatus::Issued => {}
        }

        let paid_amount = round_money(data.paid_amount.unwrap_or(existing.total_due));
        if paid_amount < existing.total_due {
            return Err(AppError::conflict("paidAmount must be >= totalDue"));
        }

        // Overpayment is recorded as-is; no change is computed
        existing.status = InvoiceStatus::Paid;
        existing.payment = Some(Payment {
            method: data.method.unwrap_or_default(),
            reference: data.reference.unwrap_or_default(),
            paid_amount,
            paid_at: Utc::now(),
        });
        existing.updated_by = actor.clone();
        existing.updated_at = Utc::now();

        invoice::save(&self.pool, &existing).await?;
        Ok(existing)
    }

    pub async fn delete(&self, tenant_id: &str, id: &str) -> AppResult<()> {
        let existing = self.get(tenant_id, id).await?;
        if existing.status == InvoiceStatus::Paid {
            return Err(AppError::conflict("cannot delete a paid invoice"));
        }
        invoice::delete(&self.pool, tenant_id, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_discount() {
        let (kind, value, amount, due) =
            compute_discount(100.0, Some("PERCENTAGE"), Some(10.0)).unwrap();
        assert_eq!(kind, Some(DiscountType::Percentage));
        assert_eq!(value, 10.0);
        assert_eq!(amount, 10.0);
        assert_eq!(due, 90.0);
    }

    #[test]
    fn flat_discount() {
        let (_, _, amount, due) = compute_discount(50.0, Some("FLAT"), Some(7.505)).unwrap();
        assert_eq!(amount, 7.51);
        assert_eq!(due, 42.49);
    }

    #[test]
    fn no_discount_when_nothing_supplied() {
        let (kind, value, amount, due) = compute_discount(33.33, None, None).unwrap();
        assert_eq!(kind, None);
        assert_eq!(value, 0.0);
        assert_eq!(amount, 0.0);
        assert_eq!(due, 33.33);
    }

    #[test]
    fn flat_discount_may_equal_grand_total() {
        let (_, _, amount, due) = compute_discount(20.0, Some("FLAT"), Some(20.0)).unwrap();
        assert_eq!(amount, 20.0);
        assert_eq!(due, 0.0);
    }

    #[test]
    fn rejects_discount_over_grand_total() {
        let err = compute_discount(20.0, Some("FLAT"), Some(20.01)).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "discount exceeds grand total"));
    }

    #[test]
    fn rejects_percentage_over_100() {
        let err = compute_discount(20.0, Some("PERCENTAGE"), Some(100.5)).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "discountValue must be between 0 and 100")
        );
    }

    #[test]
    fn rejects_negative_value_and_unknown_type() {
        let err = compute_discount(20.0, Some("FLAT"), Some(-1.0)).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "discountValue must be >= 0"));
        let err = compute_discount(20.0, Some("BOGO"), Some(1.0)).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "discountType must be PERCENTAGE or FLAT")
        );
    }

    #[test]
    fn rejects_value_without_type() {
        let err = compute_discount(20.0, None, Some(5.0)).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "discountType must be PERCENTAGE or FLAT")
        );
    }

    #[test]
    fn rejects_type_without_value() {
        let err = compute_discount(20.0, Some("FLAT"), None).unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "discountValue must be a number")
        );
    }
}
