//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library App API",
        description = "Book catalog, patrons and loan history REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::save_book,
        books::loan_book,
        books::return_book,
        books::count_loaned_books,
        books::get_book_statistics,
        // Users
        users::save_user,
        users::get_users,
        users::update_user_name,
        users::delete_user,
        users::get_user_loan_histories,
    ),
    components(
        schemas(
            // Books
            crate::models::Book,
            crate::models::BookType,
            crate::models::book::BookRequest,
            crate::models::book::BookLoanRequest,
            crate::models::book::BookStatResponse,
            // Users
            crate::models::User,
            crate::models::user::UserCreateRequest,
            crate::models::user::UserUpdateRequest,
            crate::models::user::UserResponse,
            crate::models::loan_history::UserLoanHistoryResponse,
            crate::models::loan_history::BookHistoryResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog and loans"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
