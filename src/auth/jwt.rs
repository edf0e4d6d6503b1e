use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles for role-based access control
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub enum Role {
    Admin,
    Vendor,
    Customer,
    Investor,
}

impl Role {
    pub fn from_str(role: &str) -> Result<Self, String> {
        match role.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "vendor" => Ok(Role::Vendor),
            "customer" => Ok(Role::Customer),
            "investor" => Ok(Role::Investor),
            _ => Err(format!("Invalid role: {}", role)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Vendor => "vendor",
            Role::Customer => "customer",
            Role::Investor => "investor",
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub role: Role,  // Account role
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT secret is missing or not set")]
    MissingSecret,

    #[error("Failed to create JWT token")]
    TokenCreation,

    #[error("Invalid or expired JWT token")]
    InvalidToken,
}

impl From<JwtError> for StatusCode {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::MissingSecret | JwtError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            JwtError::InvalidToken => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Generate a JWT token for a user
pub fn generate_token(user_id: &Uuid, role: Role) -> Result<String, JwtError> {
    let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;

    let now = Utc::now();
    let expiry = now + Duration::hours(24);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|_| JwtError::TokenCreation)
}

/// Validate a JWT token and extract claims
pub fn validate_token(token: &str) -> Result<Claims, JwtError> {
    let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;

    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| JwtError::InvalidToken)?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("vendor").unwrap(), Role::Vendor);
        assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
        assert_eq!(Role::from_str("investor").unwrap(), Role::Investor);
        assert!(Role::from_str("analyst").is_err());
    }

    #[test]
    fn test_role_case_insensitivity() {
        assert_eq!(Role::from_str("VENDOR").unwrap(), Role::Vendor);
        assert_eq!(Role::from_str("Vendor").unwrap(), Role::Vendor);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Vendor.as_str(), "vendor");
        assert_eq!(Role::Customer.as_str(), "customer");
        assert_eq!(Role::Investor.as_str(), "investor");
    }

    #[test]
    fn test_jwt_token_generation_and_validation() {
        env::set_var("JWT_SECRET", "test_secret");

        let user_id = Uuid::new_v4();
        let token = generate_token(&user_id, Role::Vendor).expect("Token generation failed");
        assert!(!token.is_empty());

        let claims = validate_token(&token).expect("Token validation failed");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Vendor);
    }

    #[test]
    fn test_token_roundtrip_for_all_roles() {
        env::set_var("JWT_SECRET", "test_secret");
        let user_id = Uuid::new_v4();

        for role in [Role::Admin, Role::Vendor, Role::Customer, Role::Investor] {
            let token = generate_token(&user_id, role).unwrap();
            let claims = validate_token(&token).unwrap();
            assert_eq!(claims.role, role);
        }
    }

    #[test]
    fn test_token_tampering_rejected() {
        env::set_var("JWT_SECRET", "test_secret");
        let user_id = Uuid::new_v4();

        let token = generate_token(&user_id, Role::Customer).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3, "JWT should have 3 parts");

        let tampered = format!("{}.{}tampered.{}", parts[0], parts[1], parts[2]);
        assert!(matches!(validate_token(&tampered), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        env::set_var("JWT_SECRET", "test_secret");

        for token in ["", "not.a.jwt.token", "missing.segments", "eyJhbGciOiJIUzI1NiJ9"] {
            assert!(
                matches!(validate_token(token), Err(JwtError::InvalidToken)),
                "Token '{}' should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_jwt_error_conversion() {
        assert_eq!(
            StatusCode::from(JwtError::MissingSecret),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            StatusCode::from(JwtError::InvalidToken),
            StatusCode::UNAUTHORIZED
        );
    }
}
