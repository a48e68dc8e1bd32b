//! JWT 토큰 검증 및 발급.
//!
//! 검증은 (토큰, 현재 시각, 검증 키)에 대한 순수 함수입니다. 만료 검사는
//! 호출자가 넘긴 시각으로 수행하므로 같은 입력에 대해 항상 같은 결과를 냅니다.
//! 서명 검사가 만료 검사보다 먼저 수행됩니다.

use chrono::Utc;
use compta_core::{AuthConfig, CoreError, CoreResult, Role, Session};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이름
    pub username: String,
    /// 사용자 역할
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `username` - 사용자 이름
    /// * `role` - 사용자 역할
    /// * `issued_at` - 발급 시각 (Unix timestamp)
    /// * `expires_in_minutes` - 만료 시간 (분)
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        issued_at: i64,
        expires_in_minutes: i64,
    ) -> Self {
        Self {
            sub: user_id.into(),
            username: username.into(),
            role,
            iat: issued_at,
            exp: issued_at.saturating_add(expires_in_minutes.saturating_mul(60)),
            jti: Some(uuid::Uuid::new_v4().to_string()),
            iss: None,
        }
    }

    /// 읽기 전용 세션으로 변환.
    pub fn to_session(&self) -> Session {
        Session {
            user_id: self.sub.clone(),
            username: self.username.clone(),
            role: self.role,
            expires_at: self.exp,
        }
    }
}

/// 토큰 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("잘못된 토큰 형식")]
    InvalidCredential,
    #[error("토큰이 만료되었습니다")]
    ExpiredCredential,
    #[error("토큰 서명이 일치하지 않습니다")]
    SignatureMismatch,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => AuthError::SignatureMismatch,
            ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
            _ => AuthError::InvalidCredential,
        }
    }
}

/// HS256 토큰 검증기.
///
/// 키는 생성 시 한 번만 만들어지며 이후 읽기 전용입니다.
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_secs: i64,
    access_token_minutes: i64,
    issuer: Option<String>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("leeway_secs", &self.leeway_secs)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// 설정에서 검증기 생성.
    ///
    /// 설정이 유효하지 않으면 (짧은 비밀 키 등) `CoreError::Config`.
    pub fn from_config(config: &AuthConfig) -> CoreResult<Self> {
        config.validate()?;
        let leeway_secs = i64::try_from(config.leeway_secs).map_err(|_| {
            CoreError::Config(format!(
                "auth.leeway_secs 값이 너무 큽니다: {}",
                config.leeway_secs
            ))
        })?;

        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 verify()에서 호출자가 넘긴 시각으로 검사
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        match &config.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer.as_str()]);
                validation.set_required_spec_claims(&["exp", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp"]),
        }

        let secret = config.jwt_secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            leeway_secs,
            access_token_minutes: config.access_token_minutes,
            issuer: config.issuer.clone(),
        })
    }

    /// 토큰을 검증하고 Claims를 반환합니다.
    ///
    /// # Arguments
    ///
    /// * `token` - JWT 토큰 문자열
    /// * `now` - 현재 시각 (Unix timestamp)
    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if now > data.claims.exp.saturating_add(self.leeway_secs) {
            return Err(AuthError::ExpiredCredential);
        }
        Ok(data.claims)
    }

    /// 시스템 시계 기준으로 검증.
    pub fn verify_now(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, Utc::now().timestamp())
    }

    /// Claims를 서명하여 토큰 문자열로 인코딩합니다.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// 설정된 유효 시간으로 Access Token을 발급합니다.
    pub fn issue(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
        now: i64,
    ) -> Result<String, AuthError> {
        let mut claims = Claims::new(user_id, username, role, now, self.access_token_minutes);
        claims.iss = self.issuer.clone();
        self.sign(&claims)
    }
}
