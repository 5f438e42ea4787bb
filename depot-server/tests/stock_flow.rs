//! End-to-end repository tests for the stock rules.
//!
//! Each test runs against a fresh file-backed SQLite database (the pool
//! hands out several connections, so `:memory:` would not share state).

use depot_server::audit::storage::AuditStorage;
use depot_server::audit::{AuditAction, AuditQuery};
use depot_server::db::DbService;
use depot_server::db::repository::{RepoError, category, movement, product, unit, user};
use shared::models::{
    CategoryCreate, MovementCreate, MovementDirection, MovementQuery, Product, ProductCreate,
    ProductStatus, ProductUpdate, UnitCreate,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

struct TestDb {
    pool: SqlitePool,
    user_id: i64,
    category_id: i64,
    unit_id: i64,
    // Held so the database file outlives the pool
    _dir: TempDir,
}

async fn setup() -> TestDb {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("depot-test.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("open test database");
    db.seed_admin("test-password").await.expect("seed admin");
    let pool = db.pool;

    let admin = user::find_by_username(&pool, "admin")
        .await
        .expect("query admin")
        .expect("admin seeded");

    let cat = category::create(
        &pool,
        CategoryCreate {
            name: "Beverages".into(),
            is_active: None,
        },
    )
    .await
    .expect("create category");

    let unit = unit::create(
        &pool,
        UnitCreate {
            name: "Unit".into(),
            symbol: Some("un".into()),
            is_active: None,
        },
    )
    .await
    .expect("create unit");

    TestDb {
        pool,
        user_id: admin.id,
        category_id: cat.id,
        unit_id: unit.id,
        _dir: dir,
    }
}

async fn create_product(db: &TestDb, stock: i64) -> Product {
    product::create(
        &db.pool,
        ProductCreate {
            title: "Sparkling water".into(),
            brand: None,
            category: db.category_id,
            price: 4.50,
            is_active: None,
            dimension: None,
            stock: Some(stock),
            unit_of_measurement: db.unit_id,
            observation: None,
            status: None,
        },
    )
    .await
    .expect("create product")
}

fn entry(product: i64, quantity: i64) -> MovementCreate {
    MovementCreate {
        product,
        user: None,
        quantity,
        direction: MovementDirection::Entry,
    }
}

fn exit(product: i64, quantity: i64) -> MovementCreate {
    MovementCreate {
        product,
        user: None,
        quantity,
        direction: MovementDirection::Exit,
    }
}

fn validation_message(err: RepoError) -> String {
    match err {
        RepoError::Validation(msg) => msg,
        other => panic!("expected validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn product_create_derives_status_from_opening_stock() {
    let db = setup().await;

    let empty = create_product(&db, 0).await;
    assert_eq!(empty.status, ProductStatus::OutOfStock);

    let stocked = create_product(&db, 10).await;
    assert_eq!(stocked.status, ProductStatus::InStock);
}

#[tokio::test]
async fn exit_drains_to_zero_and_forces_out_of_stock() {
    let db = setup().await;
    let p = create_product(&db, 10).await;

    let mv = movement::create(&db.pool, db.user_id, exit(p.id, 10))
        .await
        .expect("exit of full stock is permitted");
    assert_eq!(mv.quantity, 10);
    assert_eq!(mv.direction, MovementDirection::Exit);
    assert!(mv.date > 0);

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 0);
    assert_eq!(p.status, ProductStatus::OutOfStock);
}

#[tokio::test]
async fn entry_recovers_out_of_stock_product() {
    let db = setup().await;
    let p = create_product(&db, 0).await;
    assert_eq!(p.status, ProductStatus::OutOfStock);

    movement::create(&db.pool, db.user_id, entry(p.id, 5))
        .await
        .expect("entry against empty product");

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 5);
    assert_eq!(p.status, ProductStatus::InStock);
}

#[tokio::test]
async fn manual_temporarily_unavailable_is_preserved_on_save() {
    let db = setup().await;
    let p = create_product(&db, 5).await;

    // Operator parks the product; stock is untouched
    let updated = product::update(
        &db.pool,
        p.id,
        ProductUpdate {
            title: None,
            brand: None,
            category: None,
            price: None,
            is_active: None,
            dimension: None,
            unit_of_measurement: None,
            observation: None,
            status: Some(ProductStatus::TemporarilyUnavailable),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, ProductStatus::TemporarilyUnavailable);

    // A later save without a status change keeps it parked
    let updated = product::update(
        &db.pool,
        p.id,
        ProductUpdate {
            title: None,
            brand: None,
            category: None,
            price: Some(5.0),
            is_active: None,
            dimension: None,
            unit_of_measurement: None,
            observation: None,
            status: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, ProductStatus::TemporarilyUnavailable);
}

#[tokio::test]
async fn requested_out_of_stock_with_positive_stock_recovers_to_in_stock() {
    let db = setup().await;
    let p = create_product(&db, 5).await;

    // The derivation never lets a positive-stock product sit at out_of_stock
    let updated = product::update(
        &db.pool,
        p.id,
        ProductUpdate {
            title: None,
            brand: None,
            category: None,
            price: None,
            is_active: None,
            dimension: None,
            unit_of_measurement: None,
            observation: None,
            status: Some(ProductStatus::OutOfStock),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, ProductStatus::InStock);
}

#[tokio::test]
async fn entry_rejects_non_positive_quantity() {
    let db = setup().await;
    let p = create_product(&db, 3).await;

    let err = movement::create(&db.pool, db.user_id, entry(p.id, 0))
        .await
        .unwrap_err();
    assert_eq!(
        validation_message(err),
        "entry quantity must be greater than 0"
    );

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 3, "stock unchanged after rejection");
}

#[tokio::test]
async fn entry_rejects_inactive_product() {
    let db = setup().await;
    let p = create_product(&db, 3).await;
    product::update(
        &db.pool,
        p.id,
        ProductUpdate {
            title: None,
            brand: None,
            category: None,
            price: None,
            is_active: Some(false),
            dimension: None,
            unit_of_measurement: None,
            observation: None,
            status: None,
        },
    )
    .await
    .unwrap();

    let err = movement::create(&db.pool, db.user_id, entry(p.id, 5))
        .await
        .unwrap_err();
    assert_eq!(
        validation_message(err),
        "cannot add entries for inactive products"
    );

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 3);
}

#[tokio::test]
async fn exit_rejects_over_withdrawal_with_current_stock_in_message() {
    let db = setup().await;
    let p = create_product(&db, 7).await;

    let err = movement::create(&db.pool, db.user_id, exit(p.id, 8))
        .await
        .unwrap_err();
    assert_eq!(
        validation_message(err),
        "cannot withdraw more than available stock (7)"
    );

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 7, "stock unchanged after rejection");
    assert_eq!(p.status, ProductStatus::InStock);
}

#[tokio::test]
async fn exit_rejects_unavailable_product_regardless_of_stock() {
    let db = setup().await;
    let p = create_product(&db, 100).await;
    product::update(
        &db.pool,
        p.id,
        ProductUpdate {
            title: None,
            brand: None,
            category: None,
            price: None,
            is_active: None,
            dimension: None,
            unit_of_measurement: None,
            observation: None,
            status: Some(ProductStatus::TemporarilyUnavailable),
        },
    )
    .await
    .unwrap();

    let err = movement::create(&db.pool, db.user_id, exit(p.id, 1))
        .await
        .unwrap_err();
    assert_eq!(
        validation_message(err),
        "cannot withdraw unavailable products"
    );

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 100);
}

#[tokio::test]
async fn movement_against_unknown_product_is_not_found() {
    let db = setup().await;
    let err = movement::create(&db.pool, db.user_id, entry(999_999, 1))
        .await
        .unwrap_err();
    match err {
        RepoError::Business(code, _) => assert_eq!(code, shared::ErrorCode::ProductNotFound),
        other => panic!("expected ProductNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn movements_are_recorded_and_filterable() {
    let db = setup().await;
    let p = create_product(&db, 10).await;

    movement::create(&db.pool, db.user_id, entry(p.id, 4))
        .await
        .unwrap();
    movement::create(&db.pool, db.user_id, exit(p.id, 2))
        .await
        .unwrap();

    let all = movement::find_all(&db.pool, &MovementQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let exits = movement::find_all(
        &db.pool,
        &MovementQuery {
            direction: Some(MovementDirection::Exit),
            product: Some(p.id),
            offset: 0,
            limit: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].quantity, 2);
    assert_eq!(exits[0].user, db.user_id);

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_exits_never_over_withdraw() {
    let db = setup().await;
    let stock = 5;
    let submissions = 8;
    let p = create_product(&db, stock).await;

    let mut handles = Vec::new();
    for _ in 0..submissions {
        let pool = db.pool.clone();
        let user_id = db.user_id;
        let product_id = p.id;
        handles.push(tokio::spawn(async move {
            movement::create(&pool, user_id, exit(product_id, 1)).await
        }));
    }

    let mut ok = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => ok += 1,
            Err(RepoError::Validation(msg)) => {
                assert!(
                    msg.starts_with("cannot withdraw more than available stock ("),
                    "unexpected rejection: {msg}"
                );
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(ok, stock, "exactly `stock` exits succeed");
    assert_eq!(rejected, submissions - stock);

    let p = product::find_by_id(&db.pool, p.id).await.unwrap().unwrap();
    assert_eq!(p.stock, 0);
    assert_eq!(p.status, ProductStatus::OutOfStock);

    let exits = movement::find_all(
        &db.pool,
        &MovementQuery {
            direction: Some(MovementDirection::Exit),
            product: Some(p.id),
            offset: 0,
            limit: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(exits.len() as i64, stock, "one movement row per success");
}

#[tokio::test]
async fn audit_purge_reports_deleted_count() {
    let db = setup().await;
    let storage = AuditStorage::new(db.pool.clone());

    for i in 0..3 {
        storage
            .append(
                AuditAction::ProductCreated,
                "product".into(),
                format!("product:{i}"),
                Some("1".into()),
                Some("admin".into()),
                serde_json::json!({"i": i}),
            )
            .await
            .unwrap();
    }

    let (entries, total) = storage.query(&AuditQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(total, 3);

    let deleted = storage.purge_all().await.unwrap();
    assert_eq!(deleted, 3);

    let (entries, total) = storage.query(&AuditQuery::default()).await.unwrap();
    assert!(entries.is_empty());
    assert_eq!(total, 0);

    // A second purge has nothing left to remove
    assert_eq!(storage.purge_all().await.unwrap(), 0);
}
