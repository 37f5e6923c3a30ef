//! End-to-end engine tests over an in-memory database.
//!
//! Covers order composition (validation, pricing, lifecycle events) and
//! invoice settlement (discounts, payment gate, immutability).

use std::sync::Arc;

use sqlx::SqlitePool;

use mesa_server::db;
use mesa_server::db::repository::{
    category, dining_table, invoice as invoice_repo, menu_item, menu_option, menu_variant,
    option_group, order as order_repo, qr_token,
};
use mesa_server::invoices::InvoiceService;
use mesa_server::orders::OrderService;
use mesa_server::services::{BroadcastEventBus, EventPublisher};
use mesa_server::utils::AppError;
use mesa_server::api::public::available_menu;
use shared::models::{
    Actor, DiningTableCreate, DiningTableUpdate, InvoiceStatus, MenuCategoryCreate,
    MenuItemCreate, MenuItemUpdate, MenuItemVariantPayload, MenuOptionCreate, MenuOptionUpdate,
    OptionGroupCreate, OptionGroupUpdate, OrderStatus,
};
use shared::request::{
    InvoiceCreate, InvoicePay, InvoiceUpdate, OrderCreate, OrderLineInput, OrderUpdate,
};

const TENANT: &str = "tenant-a";

struct Seed {
    table_id: String,
    /// burger: variant 5.00, tax 10%, group (min 1, max 2)
    burger_id: String,
    burger_variant_id: String,
    cheese_id: String,
    bacon_id: String,
    /// set menu: variant 100.00, no tax, no groups
    set_menu_id: String,
    set_menu_variant_id: String,
}

async fn seed_catalog(pool: &SqlitePool, tenant: &str) -> Seed {
    let cat = category::create(
        pool,
        tenant,
        MenuCategoryCreate {
            name: "Mains".into(),
            parent_id: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let group = option_group::create(
        pool,
        tenant,
        OptionGroupCreate {
            name: "Toppings".into(),
            min_select: Some(1),
            max_select: Some(2),
            sort_order: None,
        },
    )
    .await
    .unwrap();
    let cheese = menu_option::create(
        pool,
        tenant,
        &group.id,
        MenuOptionCreate {
            name: "Cheese".into(),
            price: Some(1.0),
            sort_order: None,
        },
    )
    .await
    .unwrap();
    let bacon = menu_option::create(
        pool,
        tenant,
        &group.id,
        MenuOptionCreate {
            name: "Bacon".into(),
            price: Some(0.5),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let burger = menu_item::create(
        pool,
        tenant,
        MenuItemCreate {
            category_id: cat.id.clone(),
            name: "Burger".into(),
            description: None,
            tax_percentage: Some(10.0),
            sort_order: None,
            variants: vec![MenuItemVariantPayload {
                name: "Regular".into(),
                price: 5.0,
                sort_order: None,
            }],
            option_group_ids: vec![group.id.clone()],
        },
    )
    .await
    .unwrap();
    let burger_variant = menu_variant::find_by_item(pool, tenant, &burger.id)
        .await
        .unwrap()
        .remove(0);

    let set_menu = menu_item::create(
        pool,
        tenant,
        MenuItemCreate {
            category_id: cat.id,
            name: "Set Menu".into(),
            description: None,
            tax_percentage: Some(0.0),
            sort_order: None,
            variants: vec![MenuItemVariantPayload {
                name: "For Two".into(),
                price: 100.0,
                sort_order: None,
            }],
            option_group_ids: vec![],
        },
    )
    .await
    .unwrap();
    let set_menu_variant = menu_variant::find_by_item(pool, tenant, &set_menu.id)
        .await
        .unwrap()
        .remove(0);

    let table = dining_table::create(
        pool,
        tenant,
        DiningTableCreate {
            number: 1,
            name: Some("Window".into()),
            capacity: Some(4),
        },
    )
    .await
    .unwrap();

    Seed {
        table_id: table.id,
        burger_id: burger.id,
        burger_variant_id: burger_variant.id,
        cheese_id: cheese.id,
        bacon_id: bacon.id,
        set_menu_id: set_menu.id,
        set_menu_variant_id: set_menu_variant.id,
    }
}

struct TestEnv {
    pool: SqlitePool,
    bus: Arc<BroadcastEventBus>,
    orders: OrderService,
    invoices: InvoiceService,
    seed: Seed,
}

async fn setup() -> TestEnv {
    let pool = db::connect_in_memory().await.unwrap();
    let seed = seed_catalog(&pool, TENANT).await;
    let bus = Arc::new(BroadcastEventBus::new(32));
    let publisher: Arc<dyn EventPublisher> = bus.clone();
    TestEnv {
        orders: OrderService::new(pool.clone(), publisher),
        invoices: InvoiceService::new(pool.clone()),
        pool,
        bus,
        seed,
    }
}

fn staff() -> Actor {
    Actor {
        user_id: "user-1".into(),
        role: "WAITER".into(),
        name: "Ana".into(),
    }
}

fn burger_line(env: &TestEnv, quantity: i64, option_ids: Vec<String>) -> OrderLineInput {
    OrderLineInput {
        item_id: env.seed.burger_id.clone(),
        variant_id: env.seed.burger_variant_id.clone(),
        quantity,
        option_ids,
        note: None,
    }
}

fn set_menu_line(env: &TestEnv) -> OrderLineInput {
    OrderLineInput {
        item_id: env.seed.set_menu_id.clone(),
        variant_id: env.seed.set_menu_variant_id.clone(),
        quantity: 1,
        option_ids: vec![],
        note: None,
    }
}

fn order_create(env: &TestEnv, items: Vec<OrderLineInput>) -> OrderCreate {
    OrderCreate {
        table_id: env.seed.table_id.clone(),
        note: None,
        items,
    }
}

// ========== Order composition ==========

#[tokio::test]
async fn create_order_prices_variant_option_and_tax() {
    let env = setup().await;
    // variant 5.00 + option 1.00, qty 2, tax 10%
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 2, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();

    let line = &order.items[0];
    assert_eq!(line.unit_price, 6.0);
    assert_eq!(line.line_sub_total, 12.0);
    assert_eq!(line.line_tax, 1.2);
    assert_eq!(line.line_total, 13.2);
    assert_eq!(order.sub_total, 12.0);
    assert_eq!(order.tax_total, 1.2);
    assert_eq!(order.grand_total, 13.2);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.table_number, 1);
    assert_eq!(order.table_name, "Window");
}

#[tokio::test]
async fn order_totals_sum_lines() {
    let env = setup().await;
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(
                &env,
                vec![
                    burger_line(&env, 2, vec![env.seed.cheese_id.clone()]),
                    burger_line(
                        &env,
                        1,
                        vec![env.seed.cheese_id.clone(), env.seed.bacon_id.clone()],
                    ),
                    set_menu_line(&env),
                ],
            ),
        )
        .await
        .unwrap();

    let sub: f64 = order.items.iter().map(|l| l.line_sub_total).sum();
    let tax: f64 = order.items.iter().map(|l| l.line_tax).sum();
    assert_eq!(order.sub_total, (sub * 100.0).round() / 100.0);
    assert_eq!(order.tax_total, (tax * 100.0).round() / 100.0);
    assert_eq!(
        order.grand_total,
        ((order.sub_total + order.tax_total) * 100.0).round() / 100.0
    );
    for line in &order.items {
        assert_eq!(
            line.line_total,
            ((line.line_sub_total + line.line_tax) * 100.0).round() / 100.0
        );
    }
}

#[tokio::test]
async fn min_select_violation_rejected() {
    let env = setup().await;
    let err = env
        .orders
        .create(TENANT, &staff(), order_create(&env, vec![burger_line(&env, 1, vec![])]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Validation(msg) if msg == "minSelect not satisfied for group Toppings")
    );
}

#[tokio::test]
async fn max_select_violation_rejected() {
    let env = setup().await;
    // a third option so three distinct selections are possible
    let group_id = {
        let opt = menu_option::find_by_id(&env.pool, TENANT, &env.seed.cheese_id)
            .await
            .unwrap()
            .unwrap();
        opt.group_id
    };
    let onions = menu_option::create(
        &env.pool,
        TENANT,
        &group_id,
        MenuOptionCreate {
            name: "Onions".into(),
            price: Some(0.2),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let err = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(
                &env,
                vec![burger_line(
                    &env,
                    1,
                    vec![
                        env.seed.cheese_id.clone(),
                        env.seed.bacon_id.clone(),
                        onions.id,
                    ],
                )],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg.contains("maxSelect exceeded")));
}

#[tokio::test]
async fn empty_items_rejected() {
    let env = setup().await;
    let err = env
        .orders
        .create(TENANT, &staff(), order_create(&env, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "items must be a non-empty array"));
}

#[tokio::test]
async fn update_order_replaces_lines_and_totals() {
    let env = setup().await;
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 2, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();

    let updated = env
        .orders
        .update(
            TENANT,
            &order.id,
            &staff(),
            OrderUpdate {
                status: Some("IN_PROGRESS".into()),
                items: Some(vec![set_menu_line(&env)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, OrderStatus::InProgress);
    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.grand_total, 100.0);
}

#[tokio::test]
async fn update_order_requires_a_field() {
    let env = setup().await;
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();

    let err = env
        .orders
        .update(TENANT, &order.id, &staff(), OrderUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "no updates provided"));
}

#[tokio::test]
async fn unknown_item_id_rejected_in_bulk() {
    let env = setup().await;
    let err = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(
                &env,
                vec![
                    burger_line(&env, 1, vec![env.seed.cheese_id.clone()]),
                    OrderLineInput {
                        item_id: "no-such-item".into(),
                        variant_id: env.seed.burger_variant_id.clone(),
                        quantity: 1,
                        option_ids: vec![],
                        note: None,
                    },
                ],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "one or more items not found"));
}

#[tokio::test]
async fn deactivated_group_still_bounds_orders() {
    let env = setup().await;
    let group_id = menu_option::find_by_id(&env.pool, TENANT, &env.seed.cheese_id)
        .await
        .unwrap()
        .unwrap()
        .group_id;
    option_group::update(
        &env.pool,
        TENANT,
        &group_id,
        OptionGroupUpdate {
            name: None,
            min_select: None,
            max_select: None,
            sort_order: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    // the attachment keeps its bounds
    let err = env
        .orders
        .create(TENANT, &staff(), order_create(&env, vec![burger_line(&env, 1, vec![])]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Validation(msg) if msg == "minSelect not satisfied for group Toppings")
    );

    // and its options remain selectable
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();
    assert_eq!(order.grand_total, 6.6);
}

#[tokio::test]
async fn deactivated_table_reads_as_missing() {
    let env = setup().await;
    dining_table::update(
        &env.pool,
        TENANT,
        &env.seed.table_id,
        DiningTableUpdate {
            number: None,
            name: None,
            capacity: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    let err = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "table not found"));
}

#[tokio::test]
async fn order_lifecycle_emits_events() {
    let env = setup().await;
    let mut rx = env.bus.subscribe();

    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();
    env.orders.delete(TENANT, &order.id).await.unwrap();

    let created = rx.recv().await.unwrap();
    assert_eq!(created.name(), "order.created");
    assert_eq!(created.tenant_id, TENANT);
    assert!(!created.payload.is_null());

    let deleted = rx.recv().await.unwrap();
    assert_eq!(deleted.name(), "order.deleted");
    assert_eq!(deleted.resource_id, order.id);
    // the body no longer exists, only the identifier travels
    assert!(deleted.payload.is_null());
}

#[tokio::test]
async fn deleted_order_is_gone() {
    let env = setup().await;
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();
    env.orders.delete(TENANT, &order.id).await.unwrap();

    let err = env.orders.get(TENANT, &order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn cross_tenant_reads_are_not_found() {
    let env = setup().await;
    let order = env
        .orders
        .create(
            TENANT,
            &staff(),
            order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
        )
        .await
        .unwrap();

    let err = env.orders.get("tenant-b", &order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_orders_paginates() {
    let env = setup().await;
    for _ in 0..3 {
        env.orders
            .create(
                TENANT,
                &staff(),
                order_create(&env, vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
            )
            .await
            .unwrap();
    }

    let (page, total) = env
        .orders
        .list(TENANT, &order_repo::OrderFilter::default(), 2, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(total, 3);

    let (rest, _) = env
        .orders
        .list(TENANT, &order_repo::OrderFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
}

// ========== Invoice settlement ==========

async fn place_set_menu_order(env: &TestEnv) -> String {
    env.orders
        .create(TENANT, &staff(), order_create(env, vec![set_menu_line(env)]))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn percentage_discount_on_invoice() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;

    // grand 100.00, PERCENTAGE 10 -> discount 10.00, due 90.00
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: Some("PERCENTAGE".into()),
                discount_value: Some(10.0),
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.status, InvoiceStatus::Issued);
    assert_eq!(invoice.grand_total, 100.0);
    assert_eq!(invoice.discount_amount, 10.0);
    assert_eq!(invoice.total_due, 90.0);
    assert_eq!(invoice.balance_due(), 90.0);
}

#[tokio::test]
async fn duplicate_invoice_conflicts() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;

    let first = InvoiceCreate {
        order_id: order_id.clone(),
        note: None,
        discount_type: None,
        discount_value: None,
    };
    env.invoices.create(TENANT, &staff(), first.clone()).await.unwrap();

    let err = env.invoices.create(TENANT, &staff(), first).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(msg) if msg == "invoice already exists for this order"));
}

#[tokio::test]
async fn cancelled_order_cannot_be_invoiced() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    env.orders
        .update(
            TENANT,
            &order_id,
            &staff(),
            OrderUpdate {
                status: Some("CANCELLED".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(msg) if msg == "cannot create invoice for cancelled order"));
}

#[tokio::test]
async fn invoice_snapshot_ignores_later_order_edits() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id: order_id.clone(),
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(invoice.grand_total, 100.0);

    // mutate the order after invoicing
    env.orders
        .update(
            TENANT,
            &order_id,
            &staff(),
            OrderUpdate {
                items: Some(vec![burger_line(&env, 1, vec![env.seed.cheese_id.clone()])]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = env.invoices.get(TENANT, &invoice.id).await.unwrap();
    assert_eq!(reloaded.grand_total, 100.0);
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.items[0].name, "Set Menu");
}

#[tokio::test]
async fn discount_cannot_exceed_grand_total() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;

    let err = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: Some("FLAT".into()),
                discount_value: Some(100.01),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "discount exceeds grand total"));
}

#[tokio::test]
async fn payment_gate_and_balance() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: Some("PERCENTAGE".into()),
                discount_value: Some(10.0),
            },
        )
        .await
        .unwrap();

    // underpayment fails
    let err = env
        .invoices
        .pay(
            TENANT,
            &invoice.id,
            &staff(),
            InvoicePay {
                paid_amount: Some(89.99),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(msg) if msg == "paidAmount must be >= totalDue"));

    // exact payment settles with zero balance
    let paid = env
        .invoices
        .pay(
            TENANT,
            &invoice.id,
            &staff(),
            InvoicePay {
                paid_amount: Some(90.0),
                method: Some("CASH".into()),
                reference: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.balance_due(), 0.0);
    assert_eq!(paid.payment.as_ref().unwrap().paid_amount, 90.0);

    // paying twice conflicts
    let err = env
        .invoices
        .pay(TENANT, &invoice.id, &staff(), InvoicePay::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn pay_defaults_to_total_due() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();

    let paid = env
        .invoices
        .pay(TENANT, &invoice.id, &staff(), InvoicePay::default())
        .await
        .unwrap();
    assert_eq!(paid.payment.as_ref().unwrap().paid_amount, 100.0);
    assert_eq!(paid.balance_due(), 0.0);
}

#[tokio::test]
async fn overpayment_recorded_as_is() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();

    let paid = env
        .invoices
        .pay(
            TENANT,
            &invoice.id,
            &staff(),
            InvoicePay {
                paid_amount: Some(120.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(paid.payment.as_ref().unwrap().paid_amount, 120.0);
    assert_eq!(paid.balance_due(), 0.0);
}

#[tokio::test]
async fn settled_invoice_is_immutable() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();
    env.invoices
        .pay(TENANT, &invoice.id, &staff(), InvoicePay::default())
        .await
        .unwrap();

    // discount edits are blocked
    let err = env
        .invoices
        .update(
            TENANT,
            &invoice.id,
            &staff(),
            InvoiceUpdate {
                discount_type: Some("FLAT".into()),
                discount_value: Some(5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // note edits stay allowed
    let noted = env
        .invoices
        .update(
            TENANT,
            &invoice.id,
            &staff(),
            InvoiceUpdate {
                note: Some("paid at register".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(noted.note, "paid at register");

    // deletion is blocked
    let err = env.invoices.delete(TENANT, &invoice.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(msg) if msg == "cannot delete a paid invoice"));
}

#[tokio::test]
async fn issued_invoice_can_be_deleted() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id: order_id.clone(),
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();

    env.invoices.delete(TENANT, &invoice.id).await.unwrap();
    assert!(invoice_repo::find_by_order(&env.pool, TENANT, &order_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_discount_recomputes_against_stored_grand_total() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: Some("PERCENTAGE".into()),
                discount_value: Some(10.0),
            },
        )
        .await
        .unwrap();

    let updated = env
        .invoices
        .update(
            TENANT,
            &invoice.id,
            &staff(),
            InvoiceUpdate {
                discount_type: Some("FLAT".into()),
                discount_value: Some(25.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.discount_amount, 25.0);
    assert_eq!(updated.total_due, 75.0);

    // a value without a type is not filled in from the stored discount
    let err = env
        .invoices
        .update(
            TENANT,
            &invoice.id,
            &staff(),
            InvoiceUpdate {
                discount_value: Some(5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Validation(msg) if msg == "discountType must be PERCENTAGE or FLAT")
    );
}

#[tokio::test]
async fn empty_invoice_update_rejected() {
    let env = setup().await;
    let order_id = place_set_menu_order(&env).await;
    let invoice = env
        .invoices
        .create(
            TENANT,
            &staff(),
            InvoiceCreate {
                order_id,
                note: None,
                discount_type: None,
                discount_value: None,
            },
        )
        .await
        .unwrap();

    let err = env
        .invoices
        .update(TENANT, &invoice.id, &staff(), InvoiceUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg == "no updates provided"));
}

// ========== Public QR path ==========

#[tokio::test]
async fn qr_token_orders_as_guest() {
    let env = setup().await;
    let token = qr_token::issue(&env.pool, TENANT, &env.seed.table_id, None)
        .await
        .unwrap();

    let resolved = qr_token::find_active(&env.pool, &token.token)
        .await
        .unwrap()
        .unwrap();
    let table = dining_table::find_by_id(&env.pool, &resolved.tenant_id, &resolved.table_id)
        .await
        .unwrap()
        .unwrap();

    let order = env
        .orders
        .create_for_table(
            &resolved.tenant_id,
            &table,
            &Actor::guest(),
            None,
            &[burger_line(&env, 1, vec![env.seed.cheese_id.clone()])],
        )
        .await
        .unwrap();
    assert_eq!(order.created_by.user_id, "guest");
    assert_eq!(order.grand_total, 6.6);
}

#[tokio::test]
async fn public_menu_lists_only_available_catalog() {
    let env = setup().await;
    // hide the set menu and the bacon option
    menu_item::update(
        &env.pool,
        TENANT,
        &env.seed.set_menu_id,
        MenuItemUpdate {
            category_id: None,
            name: None,
            description: None,
            tax_percentage: None,
            sort_order: None,
            is_available: Some(false),
        },
    )
    .await
    .unwrap();
    menu_option::update(
        &env.pool,
        TENANT,
        &env.seed.bacon_id,
        MenuOptionUpdate {
            name: None,
            price: None,
            sort_order: None,
            is_available: Some(false),
        },
    )
    .await
    .unwrap();

    let menu = available_menu(&env.pool, TENANT).await.unwrap();
    assert_eq!(menu.categories.len(), 1);
    assert_eq!(menu.items.len(), 1);

    let burger = &menu.items[0];
    assert_eq!(burger.item.name, "Burger");
    assert_eq!(burger.variants.len(), 1);
    assert_eq!(burger.option_groups.len(), 1);
    let toppings = &burger.option_groups[0];
    assert_eq!(toppings.group.name, "Toppings");
    assert_eq!(toppings.options.len(), 1);
    assert_eq!(toppings.options[0].name, "Cheese");
}

#[tokio::test]
async fn public_menu_hides_deactivated_groups() {
    let env = setup().await;
    let group_id = menu_option::find_by_id(&env.pool, TENANT, &env.seed.cheese_id)
        .await
        .unwrap()
        .unwrap()
        .group_id;
    option_group::update(
        &env.pool,
        TENANT,
        &group_id,
        OptionGroupUpdate {
            name: None,
            min_select: None,
            max_select: None,
            sort_order: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    let menu = available_menu(&env.pool, TENANT).await.unwrap();
    let burger = menu
        .items
        .iter()
        .find(|d| d.item.name == "Burger")
        .unwrap();
    assert!(burger.option_groups.is_empty());
}

#[tokio::test]
async fn reissuing_qr_revokes_previous_token() {
    let env = setup().await;
    let first = qr_token::issue(&env.pool, TENANT, &env.seed.table_id, None)
        .await
        .unwrap();
    let second = qr_token::issue(&env.pool, TENANT, &env.seed.table_id, None)
        .await
        .unwrap();

    assert!(qr_token::find_active(&env.pool, &first.token).await.unwrap().is_none());
    assert!(qr_token::find_active(&env.pool, &second.token).await.unwrap().is_some());
}

// ========== Storage ==========

#[tokio::test]
async fn connect_migrates_a_fresh_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mesa.db");
    let pool = db::connect(path.to_str().unwrap()).await.unwrap();

    // schema is usable right away
    seed_catalog(&pool, TENANT).await;
    pool.close().await;
}

// ========== Tables ==========

#[tokio::test]
async fn table_number_unique_per_tenant_only() {
    let env = setup().await;

    let err = dining_table::create(
        &env.pool,
        TENANT,
        DiningTableCreate {
            number: 1,
            name: None,
            capacity: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        mesa_server::db::repository::RepoError::Duplicate(_)
    ));

    // same number under another tenant is fine
    dining_table::create(
        &env.pool,
        "tenant-b",
        DiningTableCreate {
            number: 1,
            name: None,
            capacity: None,
        },
    )
    .await
    .unwrap();
}
