use guardlink::db;
use guardlink::models::alert::CreateAlert;
use guardlink::models::visitor::{CreateVisitor, VisitorStatus};
use guardlink::store::alerts::AlertStore;
use guardlink::store::visitors::VisitorStore;

fn alert(name: &str) -> CreateAlert {
    CreateAlert {
        name: name.to_string(),
        email: None,
        wallet_address: Some("0xabc".to_string()),
        message: None,
    }
}

fn visitor(name: &str) -> CreateVisitor {
    CreateVisitor {
        name: name.to_string(),
        aadhar: "123412341234".to_string(),
        phone: "9876543210".to_string(),
        address: "12 Lakeview Road, Bengaluru".to_string(),
        email: format!("{name}@example.com"),
    }
}

#[tokio::test]
async fn alert_append_publishes_newest_first_snapshot() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = AlertStore::new(pool);
    let mut rx = store.subscribe();

    store.append(alert("Jane")).await.unwrap();
    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Jane");

    store.append(alert("Carl")).await.unwrap();
    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    // Push-on-write delivers the full list, newest first.
    assert_eq!(snapshot[0].name, "Carl");
    assert_eq!(snapshot[1].name, "Jane");
}

#[tokio::test]
async fn alert_rows_keep_their_fields() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = AlertStore::new(pool);

    let stored = store
        .append(CreateAlert {
            name: "Jane".to_string(),
            email: Some("jane@example.com".to_string()),
            wallet_address: Some("0xabc".to_string()),
            message: Some("west gate".to_string()),
        })
        .await
        .unwrap();

    let fetched = store.get(&stored.id).await.unwrap();
    assert_eq!(fetched.name, "Jane");
    assert_eq!(fetched.email.as_deref(), Some("jane@example.com"));
    assert_eq!(fetched.wallet_address.as_deref(), Some("0xabc"));
    assert_eq!(fetched.message.as_deref(), Some("west gate"));
    assert_eq!(fetched.created_at, stored.created_at);
}

#[tokio::test]
async fn late_subscriber_sees_only_later_snapshots() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = AlertStore::new(pool);

    store.append(alert("before")).await.unwrap();

    let mut rx = store.subscribe();
    store.append(alert("after")).await.unwrap();

    // The first delivery already reflects everything appended so far —
    // that is how a reconnecting dashboard reconciles missed alerts.
    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "after");
}

#[tokio::test]
async fn visitor_check_in_and_status_lifecycle() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = VisitorStore::new(pool);
    let mut rx = store.subscribe();

    let jane = store.check_in(visitor("Jane")).await.unwrap();
    assert_eq!(jane.status, VisitorStatus::Online);
    assert_eq!(rx.recv().await.unwrap().len(), 1);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let updated = store
        .set_status(&jane.id, VisitorStatus::Offline)
        .await
        .unwrap();
    assert_eq!(updated.status, VisitorStatus::Offline);
    assert!(updated.last_seen > jane.last_seen);

    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot[0].status, VisitorStatus::Offline);
}

#[tokio::test]
async fn visitor_touch_moves_row_to_front() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = VisitorStore::new(pool);

    let first = store.check_in(visitor("first")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    store.check_in(visitor("second")).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    store.touch(&first.id).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].name, "first");
    assert_eq!(listed[1].name, "second");
}

#[tokio::test]
async fn visitor_touch_unknown_id_errors() {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let store = VisitorStore::new(pool);
    assert!(store.touch("missing").await.is_err());
}
