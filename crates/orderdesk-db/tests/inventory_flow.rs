//! End-to-end scenarios against a fresh in-memory database.

use orderdesk_core::{Client, CoreError, Product};
use orderdesk_db::{Database, DbConfig, EntityDescriptor, ServiceError, Tabulation};

async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

#[tokio::test]
async fn client_round_trip() {
    let db = database().await;
    let clients = db.clients().unwrap();

    let ana = Client::new("Ana", "Main St", "ana@x.com", 30);
    let stored = clients.insert(ana.clone()).await.unwrap();

    assert!(stored.id > 0);
    assert_eq!(
        Client {
            id: stored.id,
            ..ana
        },
        stored
    );
    assert_eq!(clients.find_by_id(stored.id).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn order_flow_moves_stock_only_on_success() {
    let db = database().await;

    let ana = db
        .client_service()
        .unwrap()
        .add_client(Client::new("Ana", "Main St", "ana@x.com", 30))
        .await
        .unwrap();
    let widget = db
        .product_service()
        .unwrap()
        .add_product(Product::new("Widget", 10, 5.0))
        .await
        .unwrap();

    let orders = db.order_service().unwrap();
    let products = db.products().unwrap();

    let order = orders.create_order(ana.id, widget.id, 3).await.unwrap();
    assert_eq!(order.total_price, 15.0);
    assert_eq!(products.find_by_id(widget.id).await.unwrap().unwrap().stock, 7);

    let err = orders.create_order(ana.id, widget.id, 100).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Core(CoreError::InsufficientStock { .. })
    ));
    assert_eq!(products.find_by_id(widget.id).await.unwrap().unwrap().stock, 7);
    assert_eq!(orders.list_orders().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_of_missing_id_changes_nothing() {
    let db = database().await;
    let products = db.products().unwrap();

    let widget = products
        .insert(Product::new("Widget", 10, 5.0))
        .await
        .unwrap();
    let before = products.find_all().await.unwrap();

    let mut ghost = Product::new("Ghost", 1, 1.0);
    ghost.id = widget.id + 100;
    let returned = products.update(ghost.clone()).await.unwrap();

    assert_eq!(returned, ghost);
    assert_eq!(products.find_all().await.unwrap(), before);
}

#[tokio::test]
async fn find_all_is_stable_without_writes() {
    let db = database().await;
    let clients = db.clients().unwrap();

    for (i, name) in ["Ana", "Bo", "Cy"].iter().enumerate() {
        clients
            .insert(Client::new(*name, "Main St", format!("{}@x.com", i), 20 + i as i64))
            .await
            .unwrap();
    }

    let first = clients.find_all().await.unwrap();
    let second = clients.find_all().await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn deleted_entities_are_absent() {
    let db = database().await;
    let clients = db.clients().unwrap();

    let ana = clients
        .insert(Client::new("Ana", "Main St", "ana@x.com", 30))
        .await
        .unwrap();

    assert_eq!(clients.delete(ana.id).await.unwrap(), 1);
    assert_eq!(clients.find_by_id(ana.id).await.unwrap(), None);
    assert!(clients.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn tabulation_of_stored_products() {
    let db = database().await;
    let products = db.products().unwrap();

    products
        .insert(Product::new("Widget", 10, 5.0))
        .await
        .unwrap();
    products
        .insert(Product::new("Gizmo", 2, 12.5))
        .await
        .unwrap();

    let all = products.find_all().await.unwrap();
    let descriptor = EntityDescriptor::<Product>::of().unwrap();
    let table = Tabulation::from_entities(&descriptor, &all);

    assert_eq!(table.headers(), ["idProduct", "name", "quantity", "price"]);
    assert_eq!(table.rows()[0][1..], ["Widget", "10", "5"]);
    assert_eq!(table.rows()[1][1..], ["Gizmo", "2", "12.5"]);
}
