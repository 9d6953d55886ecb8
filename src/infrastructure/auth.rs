use crate::domain::auth::{AuthService, Claims};
use crate::infrastructure::config::{AuthConfig, JwtKeySource};
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fs;
use uuid::Uuid;

/// JWT Authentication Service (HS256 with a shared secret, or ES256 with PEM keys)
pub struct JwtAuthService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtAuthService {
    /// Build the service described by the auth configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        match &config.key_source {
            JwtKeySource::Secret(secret) => Self::new_from_secret(
                secret.as_bytes(),
                config.access_token_expiry,
                config.refresh_token_expiry,
            ),
            JwtKeySource::KeyFiles {
                private_key_path,
                public_key_path,
            } => Self::new(
                private_key_path,
                public_key_path,
                config.access_token_expiry,
                config.refresh_token_expiry,
            ),
        }
    }

    /// Create a new ES256 service by loading keys from files
    pub fn new(
        private_key_path: &str,
        public_key_path: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self> {
        let private_key_pem = fs::read(private_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read private key file: {}", e))?;

        let public_key_pem = fs::read(public_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?;

        Self::new_from_keys(
            &private_key_pem,
            &public_key_pem,
            access_token_expiry,
            refresh_token_expiry,
        )
    }

    /// Create a new ES256 service from key content
    pub fn new_from_keys(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_ec_pem(private_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse private key: {}", e))?;

        let decoding_key = DecodingKey::from_ec_pem(public_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self {
            algorithm: Algorithm::ES256,
            encoding_key,
            decoding_key,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    /// Create a new HS256 service from a shared secret
    pub fn new_from_secret(
        secret: &[u8],
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self> {
        if secret.is_empty() {
            return Err(anyhow::anyhow!("JWT secret must not be empty"));
        }

        Ok(Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", claims.token_type, e))
    }
}

impl AuthService for JwtAuthService {
    fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.sign(&Claims::new_access_token(
            user_id,
            self.access_token_expiry,
        ))
    }

    fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.sign(&Claims::new_refresh_token(
            user_id,
            self.refresh_token_expiry,
        ))
    }

    fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
