//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, NewCustomer, Session, Transit, build_password_input,
        build_verifier_input, format_api_token, generate_api_token_secret, parse_api_token,
        repository::{ApiTokenInsert, PgAuthRepository},
    },
    database::Db,
    domain::customers::{
        PgCustomersRepository,
        records::{CustomerRecord, CustomerUuid},
    },
};

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// How long an issued bearer token stays valid.
pub const SESSION_LIFETIME: SignedDuration = SignedDuration::from_hours(30 * 24);

fn normalize_email(email: &str) -> Result<String, AuthServiceError> {
    let email = email.trim().to_lowercase();

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthServiceError::InvalidEmail),
    }
}

pub struct PgAuthService {
    db: Db,
    transit: Arc<dyn Transit>,
    repository: PgAuthRepository,
    customers: PgCustomersRepository,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, transit: Arc<dyn Transit>) -> Self {
        Self {
            db,
            transit,
            repository: PgAuthRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }

    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerRecord,
        point_in_time: Timestamp,
    ) -> Result<Session, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let expires_at = point_in_time.checked_add(SESSION_LIFETIME)?;

        let verifier_input = build_verifier_input(&token_uuid, version, customer.uuid, &secret);
        let token_hash = self.transit.hmac(&verifier_input).await?;

        self.repository
            .create_api_token(
                tx,
                &ApiTokenInsert {
                    uuid: token_uuid,
                    customer_uuid: customer.uuid,
                    version,
                    token_hash,
                    created_at: point_in_time,
                    expires_at,
                },
            )
            .await?;

        Ok(Session {
            token: format_api_token(token_uuid, version, &secret),
            customer,
            expires_at,
        })
    }

    /// Verify a bearer token, returning its id and owner.
    async fn verify_bearer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bearer_token: &str,
        point_in_time: Timestamp,
    ) -> Result<(Uuid, CustomerUuid), AuthServiceError> {
        let parsed = parse_api_token(bearer_token).or(Err(AuthServiceError::NotFound))?;

        let token = self
            .repository
            .find_active_api_token(tx, parsed.token_uuid, parsed.version, point_in_time)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier_input = build_verifier_input(
            &parsed.token_uuid,
            parsed.version,
            token.customer_uuid,
            &parsed.secret,
        );

        if !self.transit.verify(&verifier_input, &token.token_hash).await? {
            return Err(AuthServiceError::NotFound);
        }

        Ok((parsed.token_uuid, token.customer_uuid))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.sign_up",
        skip(self, details, point_in_time),
        fields(customer_uuid = tracing::field::Empty),
        err
    )]
    async fn sign_up(
        &self,
        details: NewCustomer,
        point_in_time: Timestamp,
    ) -> Result<Session, AuthServiceError> {
        let email = normalize_email(&details.email)?;
        let name = details.name.trim();

        if name.is_empty() {
            return Err(AuthServiceError::MissingName);
        }

        if details.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthServiceError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let password_hash = self
            .transit
            .hmac(&build_password_input(&email, &details.password))
            .await?;

        let mut tx = self.db.begin_transaction().await?;

        let customer = self
            .customers
            .create_customer(&mut tx, CustomerUuid::new(), &email, name, &password_hash)
            .await?;

        tracing::Span::current().record("customer_uuid", tracing::field::display(customer.uuid));

        let session = self.issue_session(&mut tx, customer, point_in_time).await?;

        tx.commit().await?;

        info!("customer signed up");

        Ok(session)
    }

    #[tracing::instrument(
        name = "auth.service.sign_in",
        skip(self, email, password, point_in_time),
        fields(customer_uuid = tracing::field::Empty),
        err
    )]
    async fn sign_in(
        &self,
        email: String,
        password: String,
        point_in_time: Timestamp,
    ) -> Result<Session, AuthServiceError> {
        let email = normalize_email(&email).or(Err(AuthServiceError::InvalidCredentials))?;

        let mut tx = self.db.begin_transaction().await?;

        let credentials = self
            .customers
            .find_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let valid = self
            .transit
            .verify(
                &build_password_input(&email, &password),
                &credentials.password_hash,
            )
            .await?;

        if !valid {
            warn!("password mismatch");

            return Err(AuthServiceError::InvalidCredentials);
        }

        tracing::Span::current().record(
            "customer_uuid",
            tracing::field::display(credentials.customer.uuid),
        );

        let session = self
            .issue_session(&mut tx, credentials.customer, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn sign_out(
        &self,
        bearer_token: &str,
        point_in_time: Timestamp,
    ) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (token_uuid, _customer) = self
            .verify_bearer(&mut tx, bearer_token, point_in_time)
            .await?;

        self.repository
            .revoke_api_token(&mut tx, token_uuid, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
        point_in_time: Timestamp,
    ) -> Result<CustomerUuid, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (token_uuid, customer) = self
            .verify_bearer(&mut tx, bearer_token, point_in_time)
            .await?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token(&mut tx, token_uuid, point_in_time)
            .await
        {
            warn!(%error, "failed to record token use");
        }

        tx.commit().await?;

        Ok(customer)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a customer and sign them in.
    async fn sign_up(
        &self,
        details: NewCustomer,
        point_in_time: Timestamp,
    ) -> Result<Session, AuthServiceError>;

    /// Exchange an email and password for a new bearer token.
    async fn sign_in(
        &self,
        email: String,
        password: String,
        point_in_time: Timestamp,
    ) -> Result<Session, AuthServiceError>;

    /// Revoke the presented bearer token.
    async fn sign_out(
        &self,
        bearer_token: &str,
        point_in_time: Timestamp,
    ) -> Result<(), AuthServiceError>;

    /// Resolve a bearer token to its customer.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
        point_in_time: Timestamp,
    ) -> Result<CustomerUuid, AuthServiceError>;
}
