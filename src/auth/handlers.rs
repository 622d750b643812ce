use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
        extractors::JsonOrForm,
        jwt::TokenKeys,
        password::{hash_password, verify_password},
        repo::User,
        validate::validate_registration,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(mut payload): JsonOrForm<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let errors = validate_registration(&payload);
    if !errors.is_empty() {
        warn!(fields = errors.len(), "registration rejected by validation");
        return Err(ApiError::Validation(errors));
    }

    // Friendly-path duplicate check; the unique index on email catches the
    // race between concurrent registrations.
    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::UserExists);
    }

    let digest = hash_password(&payload.password)?;

    let user = User::create(
        &state.db,
        payload.firstname.trim(),
        payload.lastname.trim(),
        &payload.email,
        &digest,
    )
    .await?;

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign(user.id, Some(&user.email))?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "You have successfully registered!",
            user: PublicUser {
                id: user.id,
                firstname: user.firstname,
                lastname: user.lastname,
                email: user.email,
            },
            token,
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            warn!("login with missing credentials");
            return Err(ApiError::MissingCredentials);
        }
    };
    let email = email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::Unauthorized("User not found!"));
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Password is incorrect"));
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign(user.id, None)?;

    // httpOnly with the token's lifetime; secure/same-site deliberately unset
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(keys.ttl.as_secs() as i64))
        .build();

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "You have successfully logged in!",
            success: true,
            token,
        }),
    ))
}
