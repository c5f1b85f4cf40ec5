//! [`Context`]-related definitions.

use std::sync::{
    atomic::{self, AtomicU16},
    Arc,
};

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use derive_more::Debug;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use serde::Deserialize;
use service::domain::user;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, define_error, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`Auth`] verifying authentication tokens.
    auth: Auth,

    /// Error status code.
    error_status_code: AtomicU16,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// Current [`Identity`].
    current_identity: OnceCell<Identity>,

    /// Last authentication [`Error`].
    auth_error: OnceCell<Error>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the error status code of this [`Context`].
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(
            self.error_status_code.load(atomic::Ordering::Relaxed),
        )
        .expect("invalid status code")
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }

    /// Tries to get the current [`Identity`] for this [`Context`].
    ///
    /// [`None`] is returned for anonymous requests.
    ///
    /// # Errors
    ///
    /// Errors if the provided authentication token is invalid.
    pub async fn try_current_identity(
        &self,
    ) -> Result<Option<Identity>, Error> {
        self.current_identity().await.map(Some).or_else(|e| {
            if e.code == Error::from(AuthError::AuthorizationRequired).code {
                Ok(None)
            } else {
                Err(e)
            }
        })
    }

    /// Returns the current [`Identity`] for this [`Context`].
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request is not authorized;
    /// - the provided authentication token is invalid.
    pub async fn current_identity(&self) -> Result<Identity, Error> {
        self.current_identity
            .get_or_try_init(|| async {
                match self
                    .auth_error
                    .get_or_try_init(|| async {
                        match self.do_authentication().await {
                            Ok(i) => Err(i),
                            Err(e) => Ok(e),
                        }
                    })
                    .await
                {
                    Ok(e) => Err(e),
                    Err(i) => Ok(i),
                }
            })
            .await
            .copied()
            .map_err(Clone::clone)
    }

    /// Applies the [`juniper::Variables`] provided by the client on GraphQL
    /// subscription initialization.
    ///
    /// # Errors
    ///
    /// Errors if the provided variables are invalid.
    pub(crate) fn apply_subscription_variables(
        &mut self,
        vars: &juniper::Variables,
    ) -> Result<(), Error> {
        if let Some(token) = vars.get("authToken") {
            let token = token
                .as_string_value()
                .ok_or_else(|| Error::from(AuthError::InvalidVariables))?;
            let token = format!("Bearer {token}")
                .parse()
                .map_err(|_| Error::from(AuthError::InvalidVariables))?;
            drop(
                self.parts
                    .headers
                    .insert(http::header::AUTHORIZATION, token),
            );
        }

        Ok(())
    }

    /// Performs the [`Identity`] authentication.
    ///
    /// # Errors
    ///
    /// Errors if the provided authentication token is invalid.
    async fn do_authentication(&self) -> Result<Identity, Error> {
        let res = self
            .parts
            .clone()
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await;
        match res {
            Ok(TypedHeader(Authorization(bearer))) => {
                self.auth.verify(bearer.token())
            }
            Err(e) => {
                if e.is_missing() {
                    Err(AuthError::AuthorizationRequired.into())
                } else {
                    Err(AuthError::InvalidAuthToken.into())
                }
            }
        }
        .map_err(self.error())
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let missing = |what: &'static str| JuniperResponse {
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            response: GraphQLBatchResponse::Single(GraphQLResponse::error(
                Error::internal(&format!("missing `{what}` extension"))
                    .into_field_error(),
            )),
        };

        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| missing("Service"))?;
        let auth = parts
            .extensions
            .get::<Auth>()
            .cloned()
            .ok_or_else(|| missing("Auth"))?;

        Ok(Self {
            service,
            auth,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            parts: parts.clone(),
            current_identity: OnceCell::new(),
            auth_error: OnceCell::new(),
        })
    }
}

/// Authenticated identity of the current request.
#[derive(Clone, Copy, Debug)]
pub struct Identity {
    /// ID of the authenticated user.
    pub user_id: api::user::Id,

    /// [`user::Role`] of the authenticated user.
    pub role: user::Role,
}

impl Identity {
    /// Returns the [`user::Actor`] represented by this [`Identity`].
    #[must_use]
    pub fn actor(&self) -> user::Actor {
        user::Actor {
            id: self.user_id.into(),
            role: self.role,
        }
    }
}

/// Verifier of [JWT]-based authentication tokens.
///
/// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
#[derive(Clone, Debug)]
pub struct Auth {
    /// Key verifying token signatures.
    #[debug(skip)]
    decoding_key: Arc<DecodingKey>,

    /// Validation rules applied to tokens.
    validation: Validation,
}

impl Auth {
    /// Creates a new [`Auth`] verifying tokens signed with the provided
    /// `secret`.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_ref())),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verifies the provided `token` and extracts the [`Identity`] it
    /// carries.
    ///
    /// # Errors
    ///
    /// Errors if the `token` is expired, malformed, or carries a wrong
    /// signature.
    fn verify(&self, token: &str) -> Result<Identity, Error> {
        jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map(|data| Identity {
            user_id: data.claims.sub.into(),
            role: if data.claims.admin {
                user::Role::Admin
            } else {
                user::Role::Member
            },
        })
        .map_err(|_| AuthError::InvalidAuthToken.into())
    }
}

/// Claims carried by an authentication token.
#[derive(Clone, Copy, Debug, Deserialize)]
struct Claims {
    /// ID of the authenticated user.
    sub: Uuid,

    /// Indicator whether the authenticated user is an administrator.
    #[serde(default)]
    admin: bool,

    /// Expiration time of the token, as a Unix timestamp.
    #[expect(dead_code, reason = "validated by `jsonwebtoken` itself")]
    exp: u64,
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_AUTH_TOKEN"]
        #[status = UNAUTHORIZED]
        #[message = "Invalid authorization token"]
        InvalidAuthToken,

        #[code = "INVALID_VARIABLES"]
        #[status = BAD_REQUEST]
        #[message = "Invalid subscription authorization variables"]
        InvalidVariables,
    }
}
