//! User management endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        loan_history::UserLoanHistoryResponse,
        user::{UserCreateRequest, UserDeleteQuery, UserResponse, UserUpdateRequest},
        User,
    },
    AppState,
};

/// Create a new user
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_user(
    State(state): State<AppState>,
    Json(request): Json<UserCreateRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    request.validate()?;

    let user = state.services.users.save_user(&request.name, request.age).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>)
    )
)]
pub async fn get_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.get_users().await?;
    Ok(Json(users))
}

/// Rename a user
#[utoipa::path(
    put,
    path = "/user",
    tag = "users",
    request_body = UserUpdateRequest,
    responses(
        (status = 204, description = "User renamed"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user_name(
    State(state): State<AppState>,
    Json(request): Json<UserUpdateRequest>,
) -> AppResult<StatusCode> {
    request.validate()?;

    state
        .services
        .users
        .update_user_name(request.id, &request.name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user by name
#[utoipa::path(
    delete,
    path = "/user",
    tag = "users",
    params(UserDeleteQuery),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Several users share this name", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<UserDeleteQuery>,
) -> AppResult<StatusCode> {
    query.validate()?;

    state.services.users.delete_user(&query.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every user with their loan history
#[utoipa::path(
    get,
    path = "/user/loan",
    tag = "users",
    responses(
        (status = 200, description = "Loan histories per user", body = Vec<UserLoanHistoryResponse>)
    )
)]
pub async fn get_user_loan_histories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserLoanHistoryResponse>>> {
    let histories = state.services.users.get_user_loan_histories().await?;
    Ok(Json(histories))
}
