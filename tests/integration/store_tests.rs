//! PostgreSQL store tests
//!
//! Each test gets a fresh database with the migrations applied.
//! Run with: DATABASE_URL=postgres://... cargo test --test store_tests -- --ignored

use sqlx::PgPool;
use tokio_test::{assert_err, assert_ok};

use library_app_server::{
    models::{BookType, User, UserLoanStatus},
    repository::Repository,
    services::Services,
    AppError,
};

const BOOK: &str = "Alice in Wonderland";

async fn setup(pool: PgPool) -> (Services, Repository) {
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());
    services.users.save_user("Choi", None).await.unwrap();
    (services, repository)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_concurrent_loans_of_one_book(pool: PgPool) {
    let (services, repository) = setup(pool).await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let services = services.clone();
            tokio::spawn(async move { services.loans.loan_book("Choi", BOOK).await })
        })
        .collect();

    let mut loaned = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => loaned += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(loaned, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(repository.loan_histories.list_all().await.unwrap().len(), 1);
    assert_eq!(services.loans.count_loaned_books().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_loan_again_after_return(pool: PgPool) {
    let (services, repository) = setup(pool).await;

    assert_ok!(services.loans.loan_book("Choi", BOOK).await);
    assert_ok!(services.loans.return_book("Choi", BOOK).await);
    assert_ok!(services.loans.loan_book("Choi", BOOK).await);

    let statuses: Vec<_> = repository
        .loan_histories
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|h| h.status)
        .collect();
    assert_eq!(statuses, vec![UserLoanStatus::Returned, UserLoanStatus::Loaned]);
    assert_eq!(services.loans.count_loaned_books().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_return_without_open_loan(pool: PgPool) {
    let (services, repository) = setup(pool).await;

    let error = assert_err!(services.loans.return_book("Choi", BOOK).await);
    assert!(matches!(error, AppError::NotFound(_)));
    assert!(repository.loan_histories.list_all().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_book_statistics_in_type_order(pool: PgPool) {
    let (services, _) = setup(pool).await;
    services.catalog.save_book("C", BookType::Science).await.unwrap();
    services.catalog.save_book("A", BookType::Computer).await.unwrap();
    services.catalog.save_book("B", BookType::Computer).await.unwrap();

    let stats: Vec<_> = services
        .catalog
        .get_book_statistics()
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.book_type, s.count))
        .collect();

    assert_eq!(stats, vec![(BookType::Computer, 2), (BookType::Science, 1)]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_blank_book_name_is_not_stored(pool: PgPool) {
    let (services, repository) = setup(pool).await;

    let error = assert_err!(services.catalog.save_book("  ", BookType::Etc).await);
    assert!(matches!(error, AppError::Validation(_)));
    assert!(repository.books.list_all().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_long_names_are_stored(pool: PgPool) {
    let (services, repository) = setup(pool).await;
    let long = "x".repeat(300);

    let book = services.catalog.save_book(&long, BookType::Etc).await.unwrap();
    assert_eq!(book.name, long);

    let user = services.users.save_user(&long, Some(30)).await.unwrap();
    let history = services.loans.loan_book(&long, &long).await.unwrap();
    assert_eq!(history.user_id, user.id);
    assert_eq!(history.book_name, long);

    let renamed = "y".repeat(300);
    assert_ok!(services.users.update_user_name(user.id, &renamed).await);
    let stored = repository.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.name, renamed);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_update_and_delete_missing_user(pool: PgPool) {
    let (_, repository) = setup(pool).await;
    let ghost = User {
        id: 999,
        name: "Ghost".to_string(),
        age: None,
    };

    let error = assert_err!(repository.users.update(&ghost).await);
    assert!(matches!(error, AppError::UserNotFound(_)));
    let error = assert_err!(repository.users.delete(&ghost).await);
    assert!(matches!(error, AppError::UserNotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_delete_user_keeps_loan_histories(pool: PgPool) {
    let (services, repository) = setup(pool).await;
    assert_ok!(services.loans.loan_book("Choi", BOOK).await);

    assert_ok!(services.users.delete_user("Choi").await);

    assert_eq!(repository.loan_histories.list_all().await.unwrap().len(), 1);
    assert!(services.users.get_user_loan_histories().await.unwrap().is_empty());
}
