use jsonwebtoken::{decode, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{auth::claims::Claims, errors::AppResult};

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
        }
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
