//! Book catalog and loan endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{BookLoanRequest, BookRequest, BookStatResponse},
        Book,
    },
    AppState,
};

/// Register a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Empty book name", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_book(
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    request.validate()?;

    let book = state
        .services
        .catalog
        .save_book(&request.name, request.book_type)
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Loan a book to a user
#[utoipa::path(
    put,
    path = "/book/loan",
    tag = "books",
    request_body = BookLoanRequest,
    responses(
        (status = 204, description = "Book loaned"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn loan_book(
    State(state): State<AppState>,
    Json(request): Json<BookLoanRequest>,
) -> AppResult<StatusCode> {
    request.validate()?;

    state
        .services
        .loans
        .loan_book(&request.user_name, &request.book_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Return a loaned book
#[utoipa::path(
    put,
    path = "/book/return",
    tag = "books",
    request_body = BookLoanRequest,
    responses(
        (status = 204, description = "Book returned"),
        (status = 404, description = "User or open loan not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Several open loans match", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Json(request): Json<BookLoanRequest>,
) -> AppResult<StatusCode> {
    request.validate()?;

    state
        .services
        .loans
        .return_book(&request.user_name, &request.book_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Number of books currently on loan
#[utoipa::path(
    get,
    path = "/book/loan",
    tag = "books",
    responses(
        (status = 200, description = "Loaned book count", body = i64)
    )
)]
pub async fn count_loaned_books(State(state): State<AppState>) -> AppResult<Json<i64>> {
    let count = state.services.loans.count_loaned_books().await?;
    Ok(Json(count))
}

/// Book count per category
#[utoipa::path(
    get,
    path = "/book/stat",
    tag = "books",
    responses(
        (status = 200, description = "Counts for categories that have books", body = Vec<BookStatResponse>)
    )
)]
pub async fn get_book_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookStatResponse>>> {
    let stats = state.services.catalog.get_book_statistics().await?;
    Ok(Json(stats))
}
