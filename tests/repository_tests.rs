//! Integration tests for the generic entity repository over the
//! in-memory store

use chancery::prelude::*;

fn repository() -> EntityRepository<Order, InMemoryStore> {
    EntityRepository::new(InMemoryStore::new(), &AppConfig::default())
}

fn sample_orders() -> Vec<Order> {
    let mut orders = vec![
        Order::new(1, "contract-review", "Meier", "meier@example.com", 250.0),
        Order::new(2, "inheritance", "Huber", "huber@example.com", 480.0),
        Order::new(3, "contract-review", "Albrecht", "albrecht@example.com", 320.0),
    ];
    orders[1].status = chancery::entities::order::status::CONFIRMED;
    orders[2].status = chancery::entities::order::status::CONFIRMED;
    orders
}

async fn seeded() -> EntityRepository<Order, InMemoryStore> {
    let repo = repository();
    for order in sample_orders() {
        repo.create(order).await.expect("create should succeed");
    }
    repo
}

#[tokio::test]
async fn create_and_get() {
    let repo = repository();
    let order = Order::new(1, "contract-review", "Meier", "meier@example.com", 250.0);

    let created = repo.create(order.clone()).await.expect("create should succeed");
    assert_eq!(created, order);

    let fetched = repo.get(1).await.expect("get should succeed");
    assert_eq!(fetched, Some(order));
}

#[tokio::test]
async fn get_missing_is_none_and_find_errors() {
    let repo = repository();
    assert_eq!(repo.get(99).await.expect("get should succeed"), None);

    let err = repo.find(99).await.unwrap_err();
    assert!(matches!(
        err,
        ChanceryError::Entity(EntityError::NotFound { .. })
    ));
}

#[tokio::test]
async fn update_requires_existing_entity() {
    let repo = seeded().await;

    let mut order = repo.find(1).await.expect("order should exist");
    order.status = chancery::entities::order::status::CLOSED;
    let updated = repo.update(1, order).await.expect("update should succeed");
    assert_eq!(updated.status, chancery::entities::order::status::CLOSED);

    let ghost = Order::new(99, "inheritance", "Nobody", "n@example.com", 1.0);
    let err = repo.update(99, ghost).await.unwrap_err();
    assert!(matches!(
        err,
        ChanceryError::Entity(EntityError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_removes_the_entity() {
    let repo = seeded().await;
    repo.delete(2).await.expect("delete should succeed");
    assert_eq!(repo.get(2).await.expect("get should succeed"), None);
}

#[tokio::test]
async fn list_filters_sorts_and_paginates_typed_entities() {
    let repo = seeded().await;

    let params = ListParams {
        filter: vec!["status||eq||1".to_string()],
        sort: "id,DESC".to_string(),
        ..Default::default()
    };
    let page = repo.list(&params).await.expect("list should succeed");

    assert_eq!(page.total, 2);
    assert_eq!(page.page_count, 1);
    let ids: Vec<i64> = page.data.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[tokio::test]
async fn list_with_default_params_returns_everything_id_desc() {
    let repo = seeded().await;
    let page = repo
        .list(&ListParams::default())
        .await
        .expect("list should succeed");

    assert_eq!(page.total, 3);
    let ids: Vec<i64> = page.data.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn list_substring_filter_on_client_name() {
    let repo = seeded().await;
    let params = ListParams {
        filter: vec!["client_name||cont||hub".to_string()],
        ..Default::default()
    };
    let page = repo.list(&params).await.expect("list should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].client_name, "Huber");
}

#[tokio::test]
async fn list_coercion_failure_is_a_bad_request() {
    let repo = seeded().await;
    let params = ListParams {
        filter: vec!["amount||gt||expensive".to_string()],
        ..Default::default()
    };
    let err = repo.list(&params).await.unwrap_err();
    assert_eq!(err.error_code(), "TYPE_COERCION_FAILED");
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_repository_reuses_the_same_pipeline() {
    let config = AppConfig::default();
    let repo: EntityRepository<Comment, InMemoryStore> =
        EntityRepository::new(InMemoryStore::new(), &config);

    for (id, order_id, published) in [(1, 10, true), (2, 10, false), (3, 11, true)] {
        let mut comment = Comment::new(id, order_id, "Anna", "note");
        comment.published = published;
        repo.create(comment).await.expect("create should succeed");
    }

    let params = ListParams {
        filter: vec![
            "order_id||eq||10".to_string(),
            "published||eq||true".to_string(),
        ],
        sort: "id,ASC".to_string(),
        ..Default::default()
    };
    let page = repo.list(&params).await.expect("list should succeed");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, 1);
}

#[tokio::test]
async fn user_repository_boolean_filter() {
    let config = AppConfig::default();
    let repo: EntityRepository<User, InMemoryStore> =
        EntityRepository::new(InMemoryStore::new(), &config);

    let mut active = User::new(1, "a@chancery.example", "Anna", "Albrecht", "admin");
    active.active = true;
    let mut inactive = User::new(2, "b@chancery.example", "Bernd", "Brandt", "clerk");
    inactive.active = false;

    repo.create(active).await.expect("create should succeed");
    repo.create(inactive).await.expect("create should succeed");

    let params = ListParams {
        filter: vec!["active||eq||true".to_string()],
        ..Default::default()
    };
    let page = repo.list(&params).await.expect("list should succeed");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].email, "a@chancery.example");
}
