#[cfg(test)]
pub mod fixtures {
    use actix_web::web;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::ExposeSecret;

    use crate::{
        auth::{Claims, JwtService},
        config::Config,
        models::domain::UserRole,
    };

    /// JWT service keyed with the test configuration's secret.
    pub fn jwt_service() -> web::Data<JwtService> {
        web::Data::new(JwtService::new(&Config::test_config().jwt_secret))
    }

    /// `Authorization` header value for a token accepted by [`jwt_service`].
    pub fn bearer_token(user_id: &str, role: UserRole) -> String {
        let config = Config::test_config();
        let token = encode(
            &Header::default(),
            &Claims::new(user_id, role, 1),
            &EncodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
        )
        .expect("test token should encode");

        format!("Bearer {}", token)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::UserRole;

    #[test]
    fn test_bearer_token_is_accepted_by_jwt_service() {
        let header = bearer_token("teacher-1", UserRole::User);
        let token = header.strip_prefix("Bearer ").expect("bearer prefix");

        let claims = jwt_service()
            .validate_token(token)
            .expect("token should validate");
        assert_eq!(claims.sub, "teacher-1");
    }
}
