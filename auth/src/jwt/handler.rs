use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret and a fixed
/// token lifetime, both set once at construction. Tokens are stateless:
/// validity is determined purely by signature and expiry at verification
/// time, so there is no revocation.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a new handler with a signing secret and token lifetime.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Issue a token for a subject, valid from now until now + lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString) -> Result<String, TokenError> {
        self.encode(&Claims::for_subject(subject, self.lifetime))
    }

    /// Encode explicit claims into a signed token.
    ///
    /// `issue` is the normal path; this exists so fixtures can mint tokens
    /// with arbitrary validity windows.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `InvalidSignature` - Signature does not match the current secret
    /// * `Expired` - Current time exceeds the encoded expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET, Duration::days(30));

        let token = handler.issue("user123").expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let handler = JwtHandler::new(SECRET, Duration::days(30));

        let result = handler.verify("not.a.token");
        assert_eq!(result, Err(TokenError::Malformed));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", Duration::days(30));
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", Duration::days(30));

        let token = handler1.issue("user123").expect("Failed to issue token");

        let result = handler2.verify(&token);
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_tampered_token() {
        let handler = JwtHandler::new(SECRET, Duration::days(30));

        let token = handler.issue("user123").expect("Failed to issue token");

        // Flip a character in the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        chars[mid] = if chars[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        let result = handler.verify(&tampered);
        assert!(matches!(
            result,
            Err(TokenError::InvalidSignature) | Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = JwtHandler::new(SECRET, Duration::days(30));

        let expired = Claims::for_subject("user123", Duration::days(30))
            .with_expiration(Utc::now().timestamp() - 3600);
        let token = handler.encode(&expired).expect("Failed to encode token");

        let result = handler.verify(&token);
        assert_eq!(result, Err(TokenError::Expired));
    }
}
