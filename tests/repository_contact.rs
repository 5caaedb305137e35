use contacts_api::domain::entities::{ContactPatch, NewContact};
use contacts_api::domain::repositories::{ContactFilter, ContactRepository};
use contacts_api::infrastructure::persistence::PgContactRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_contact(name: &str, favorite: bool) -> NewContact {
    NewContact {
        name: name.to_string(),
        favorite,
        ..Default::default()
    }
}

async fn seed(repo: &PgContactRepository, names: &[(&str, bool)]) {
    for (name, favorite) in names {
        repo.create(new_contact(name, *favorite)).await.unwrap();
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_create_and_find_contact(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));

    let created = repo
        .create(NewContact {
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            favorite: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, "Alice");
    assert!(created.favorite);

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_find_missing_contact(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));

    assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_create_rejects_blank_name(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));

    let result = repo.create(new_contact("", false)).await;

    assert_eq!(
        result.unwrap_err().status_code(),
        axum::http::StatusCode::BAD_REQUEST
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_list_orders_by_id_and_paginates(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));
    seed(
        &repo,
        &[("A", false), ("B", false), ("C", false), ("D", false), ("E", false)],
    )
    .await;

    let page = repo.list(ContactFilter::new(), 2, 2).await.unwrap();
    let names: Vec<_> = page.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["C", "D"]);

    assert!(repo.list(ContactFilter::new(), 10, 2).await.unwrap().is_empty());
    assert_eq!(repo.count(ContactFilter::new()).await.unwrap(), 5);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_filter_by_favorite_and_name(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));
    seed(
        &repo,
        &[("Anna", true), ("Joanna", false), ("Bob", true), ("50% Off", false)],
    )
    .await;

    let favorites = ContactFilter::new().with_favorite(Some(true));
    assert_eq!(repo.count(favorites).await.unwrap(), 2);

    let by_name = ContactFilter::new().with_name(Some("ANN".to_string()));
    let names: Vec<_> = repo
        .list(by_name.clone(), 0, 10)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Anna", "Joanna"]);

    let both = by_name.with_favorite(Some(true));
    assert_eq!(repo.count(both).await.unwrap(), 1);

    let wildcard = ContactFilter::new().with_name(Some("%".to_string()));
    assert_eq!(repo.count(wildcard).await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_update_contact(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));
    let contact = repo
        .create(NewContact {
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let patch = ContactPatch {
        name: Some("Alicia".to_string()),
        email: Some(None),
        favorite: Some(true),
        avatar: Some(Some("/public/uploads/a.png".to_string())),
        ..Default::default()
    };
    let updated = repo.update(contact.id, patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, None);
    assert!(updated.favorite);
    assert_eq!(updated.avatar.as_deref(), Some("/public/uploads/a.png"));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_update_missing_contact(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));

    let patch = ContactPatch {
        favorite: Some(true),
        ..Default::default()
    };
    assert_eq!(repo.update(9999, patch).await.unwrap(), None);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_delete_contact(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));
    let contact = repo.create(new_contact("Alice", false)).await.unwrap();

    let deleted = repo.delete(contact.id).await.unwrap();
    assert_eq!(deleted, Some(contact.clone()));
    assert_eq!(repo.delete(contact.id).await.unwrap(), None);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_delete_all_contacts(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));
    seed(&repo, &[("A", false), ("B", true)]).await;

    let deleted = repo.delete_all().await.unwrap();
    assert_eq!(deleted.len(), 2);
    assert_eq!(repo.count(ContactFilter::new()).await.unwrap(), 0);
    assert!(repo.delete_all().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgContactRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
