use argon2::{
    password_hash::PasswordVerifier,
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use super::jwt::{generate_token, Role};

// Input data structures
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub business_type: Option<String>,
    pub phone: Option<String>,
}

pub struct LoginData {
    pub email: String,
    pub password: String,
}

// Result data structure
pub struct AuthResult {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

// Service errors
pub enum AuthError {
    InvalidInput(String),
    AlreadyExists(String),
    InvalidCredentials,
    DatabaseError(String),
    TokenError,
    InternalError(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DatabaseError(_) | Self::TokenError | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::AlreadyExists(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::DatabaseError(msg) => format!("Database error: {}", msg),
            Self::TokenError => "Failed to generate auth token".to_string(),
            Self::InternalError(msg) => msg.clone(),
        }
    }
}

// Account registration service
pub async fn register(pool: &PgPool, data: RegisterData) -> Result<AuthResult, AuthError> {
    if data.name.is_empty() || data.email.is_empty() || data.password.is_empty() {
        return Err(AuthError::InvalidInput(
            "Name, email, and password are required".to_string(),
        ));
    }

    // Email uniqueness is case-insensitive: normalize before storing/querying.
    let email = data.email.trim().to_lowercase();

    info!("Checking if account with email {} already exists", email);

    let existing_user =
        sqlx::query_as::<_, (Uuid,)>("SELECT id FROM global.users WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error while checking existing user: {}", e);
                AuthError::DatabaseError(e.to_string())
            })?;

    if existing_user.is_some() {
        info!("Account with email {} already exists", email);
        return Err(AuthError::AlreadyExists("Email already in use".to_string()));
    }

    // Hash password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(data.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            AuthError::InternalError(format!("Password hashing failed: {}", e))
        })?
        .to_string();

    // Determine role, customer by default
    let role_str = data.role.unwrap_or_else(|| "customer".to_string());
    let role = Role::from_str(&role_str).map_err(AuthError::InvalidInput)?;

    let user_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO global.users (id, name, email, password_hash, role, business_type, phone) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(user_id)
    .bind(&data.name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role.as_str())
    .bind(&data.business_type)
    .bind(&data.phone)
    .execute(pool)
    .await
    .map_err(|e| {
        error!("Failed to insert new user: {}", e);
        AuthError::DatabaseError(e.to_string())
    })?;

    info!("Account created successfully with ID: {}", user_id);

    let token = generate_token(&user_id, role).map_err(|e| {
        error!("Token generation failed: {:?}", e);
        AuthError::TokenError
    })?;

    Ok(AuthResult {
        user_id,
        name: data.name,
        email,
        role: role.as_str().to_string(),
        token,
    })
}

// Account login service
pub async fn login(pool: &PgPool, data: LoginData) -> Result<AuthResult, AuthError> {
    let email = data.email.trim().to_lowercase();

    info!("Attempting login for account with email: {}", email);

    let user = sqlx::query_as::<_, (Uuid, String, String, String, String)>(
        "SELECT id, name, email, password_hash, role FROM global.users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!("Database error while fetching user: {}", e);
        AuthError::DatabaseError(e.to_string())
    })?;

    let user = match user {
        Some(user) => user,
        None => {
            info!("No account found with email: {}", email);
            return Err(AuthError::InvalidCredentials);
        }
    };

    let parsed_hash = argon2::password_hash::PasswordHash::new(&user.3).map_err(|e| {
        error!("Failed to parse password hash: {}", e);
        AuthError::InvalidCredentials
    })?;

    let argon2 = Argon2::default();
    argon2
        .verify_password(data.password.as_bytes(), &parsed_hash)
        .map_err(|e| {
            info!("Password verification failed: {}", e);
            AuthError::InvalidCredentials
        })?;

    let role = Role::from_str(&user.4).map_err(|e| {
        error!("Stored role is invalid for user {}: {}", user.0, e);
        AuthError::InternalError("Account role is invalid".to_string())
    })?;

    let token = generate_token(&user.0, role).map_err(|e| {
        error!("Token generation failed: {:?}", e);
        AuthError::TokenError
    })?;

    info!("Login successful for user ID: {}", user.0);

    Ok(AuthResult {
        user_id: user.0,
        name: user.1,
        email: user.2,
        role: user.4,
        token,
    })
}
