use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flocky_auth_types::bearer::bearer_token;
use flocky_core::serde::to_rfc3339_ms;

use crate::domain::types::{ClientInfo, Identity};
use crate::domain::validation::{validate_login, validate_register, validate_verify_email};
use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::{
    AuthOutput,
    login::{LoginInput, LoginUseCase},
    logout::LogoutUseCase,
    register::{RegisterInput, RegisterUseCase},
    verify_email::{VerifyEmailInput, VerifyEmailUseCase},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
}

impl From<Identity> for UserInfo {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            name: identity.name,
            email_verified: identity.email_verified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub user: UserInfo,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        Self {
            token: out.token,
            expires_at: out.expires_at,
            user: out.user.into(),
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

// Missing fields deserialize as empty strings and surface as validation errors.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub async fn register(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthServiceError> {
    validate_register(&body.email, &body.password, &body.name)?;

    let usecase = RegisterUseCase {
        identities: state.identity_repo(),
        uow: state.unit_of_work(),
    };
    let out = usecase
        .execute(
            RegisterInput {
                email: body.email,
                password: body.password,
                name: body.name,
                client,
            },
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(out.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthServiceError> {
    validate_login(&body.email, &body.password)?;

    let usecase = LoginUseCase {
        identities: state.identity_repo(),
        credentials: state.credential_repo(),
        sessions: state.session_repo(),
    };
    let out = usecase
        .execute(
            LoginInput {
                email: body.email,
                password: body.password,
                client,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(out.into()))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AuthServiceError> {
    if let Some(token) = bearer_token(&headers) {
        let usecase = LogoutUseCase {
            sessions: state.session_repo(),
        };
        usecase.execute(&token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /auth/verify-email ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct VerifyEmailRequest {
    pub identifier: String,
    pub value: String,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailRequest>,
) -> Result<StatusCode, AuthServiceError> {
    validate_verify_email(&body.identifier, &body.value)?;

    let usecase = VerifyEmailUseCase {
        identities: state.identity_repo(),
        verifications: state.verification_repo(),
        uow: state.unit_of_work(),
    };
    usecase
        .execute(
            VerifyEmailInput {
                identifier: body.identifier,
                token: body.value,
            },
            Utc::now(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
