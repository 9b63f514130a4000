use std::{net::IpAddr, sync::Arc};

use rocket::{
    self,
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::web::{jwt, sqlite};
use vozativa_core::{
    entities::{Role, User},
    gateways::verify::VerificationGateway,
    repositories::UserRepo as _,
    usecases,
};

pub const COOKIE_USER_KEY: &str = "va-user-id";
pub const COOKIE_AUTH_TOKEN_KEY: &str = "va-auth-token";

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    let x: Vec<_> = auth_header_val.split(' ').collect();
    if x.len() == 2 && x[0] == "Bearer" {
        Some(x[1])
    } else {
        None
    }
}

/// Unauthenticated request context.
///
/// Resolves the session cookie or a bearer token to a user id
/// without touching the database. Never fails, anonymous requests
/// simply carry no user id.
#[derive(Debug)]
pub struct Auth {
    bearer_tokens: Vec<String>,
    user_id: Option<String>,
    client_ip: Option<IpAddr>,
}

impl Auth {
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn bearer_tokens(&self) -> &[String] {
        &self.bearer_tokens
    }

    pub fn client_ip(&self) -> Option<IpAddr> {
        self.client_ip
    }

    fn bearer_tokens_from_header(request: &Request) -> Vec<String> {
        request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .map(ToOwned::to_owned)
            .collect()
    }

    fn user_id_from_cookie(request: &Request) -> Option<String> {
        request
            .cookies()
            .get_private(COOKIE_USER_KEY)
            .map(|cookie| cookie.value().to_string())
    }

    async fn user_id_from_jwt_in_header(
        request: &Request<'_>,
        bearer_tokens: &[String],
    ) -> Option<String> {
        let jwt_state = request.guard::<&State<jwt::JwtState>>().await.succeeded()?;
        bearer_tokens
            .iter()
            .filter_map(|token| jwt_state.validate_token_and_get_user_id(token).ok())
            .next()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let bearer_tokens = Self::bearer_tokens_from_header(request);
        let mut user_id = Self::user_id_from_cookie(request);
        if user_id.is_none() {
            user_id = Self::user_id_from_jwt_in_header(request, &bearer_tokens).await;
        }
        let client_ip = request.client_ip();
        Outcome::Success(Self {
            bearer_tokens,
            user_id,
            client_ip,
        })
    }
}

/// The authenticated account of the request.
///
/// Forwards for anonymous requests and for stale session cookies,
/// so that a lower ranked sibling route can answer with the
/// login redirect.
#[derive(Debug)]
pub struct Account(User);

impl Account {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        let Some(user_id) = auth.user_id() else {
            return Outcome::Forward(Status::Unauthorized);
        };
        let connections = try_outcome!(request.guard::<sqlite::Connections>().await);
        let Ok(db) = connections.shared() else {
            return Outcome::Error((Status::InternalServerError, ()));
        };
        match db.try_get_user(user_id) {
            Ok(Some(user)) => Outcome::Success(Account(user)),
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(err) => {
                error!("Unable to resolve account of user '{user_id}': {err}");
                Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}

/// Like [`Account`], but only passes administrators.
#[derive(Debug)]
pub struct AdminAccount(User);

impl AdminAccount {
    pub fn user(&self) -> &User {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminAccount {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        let Some(user_id) = auth.user_id() else {
            return Outcome::Forward(Status::Unauthorized);
        };
        let connections = try_outcome!(request.guard::<sqlite::Connections>().await);
        let Ok(db) = connections.shared() else {
            return Outcome::Error((Status::InternalServerError, ()));
        };
        match usecases::authorize_user_by_id(&db, user_id, Role::Admin) {
            Ok(user) => Outcome::Success(AdminAccount(user)),
            Err(usecases::Error::Unauthorized) => Outcome::Forward(Status::Unauthorized),
            Err(usecases::Error::Forbidden) => Outcome::Forward(Status::Forbidden),
            Err(err) => {
                error!("Unable to authorize user '{user_id}': {err}");
                Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}

/// The address a like or comment form was submitted from.
#[derive(Debug)]
pub struct Referer(Option<String>);

impl Referer {
    pub fn or(self, fallback: &str) -> String {
        self.0.unwrap_or_else(|| fallback.to_string())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Referer {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let referer = request.headers().get_one("Referer").map(ToOwned::to_owned);
        Outcome::Success(Self(referer))
    }
}

/// Gateway used to verify that login and registration forms were
/// submitted by a human.
pub struct Verify(pub Arc<dyn VerificationGateway + Send + Sync>);

impl Verify {
    pub fn gateway(&self) -> Arc<dyn VerificationGateway + Send + Sync> {
        Arc::clone(&self.0)
    }
}
