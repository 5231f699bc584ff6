use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_access_token(
    user_id: String,
    email: String,
    name: String,
    role: String,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        user_id,
        sub: email,
        name,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Access,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let token = generate_access_token(
            "admin-1".to_string(),
            "admin@taximanager.com".to_string(),
            "Alex Thompson".to_string(),
            "Corporate Manager".to_string(),
            "secret",
            900,
        );
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "admin@taximanager.com");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn token_fails_with_wrong_secret() {
        let token = generate_access_token(
            "admin-1".to_string(),
            "admin@taximanager.com".to_string(),
            "Alex Thompson".to_string(),
            "Corporate Manager".to_string(),
            "secret",
            900,
        );
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
