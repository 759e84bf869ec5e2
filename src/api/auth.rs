//! Authentication operations and their session side effects.

// self
use crate::{
	_prelude::*,
	api::{self, ResellerClient},
	endpoint::Operation,
	http::{ApiTransport, HttpMethod},
	obs::CallKind,
	params::{self, Params},
	session::Secret,
};

/// Credentials issued by a successful [`ResellerClient::auth`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
	/// Bearer token now attached to authenticated operations.
	pub bearer_token: Secret,
	/// Callback secret from the user profile, when the server supplied one.
	pub callback_secret: Option<Secret>,
}

impl<T> ResellerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Exchanges email + password for a bearer token and callback secret.
	///
	/// On success the session is updated; an empty or unexpected response leaves it untouched
	/// and yields `None`. The response must carry a non-empty `token` and `user`; the callback
	/// secret comes from `user.secret` and may legitimately be absent.
	pub async fn auth(&self, email: &str, password: &str) -> Result<Option<AuthSession>> {
		let params = Params::new().set("email", email).set("password", password);
		let response =
			self.dispatch(CallKind::Auth, Operation::Auth, HttpMethod::Post, params, false).await?;
		let Some(response) = response else { return Ok(None) };
		let Some(token) = api::str_field(&response, "token") else { return Ok(None) };
		let Some(user) = response.get("user").filter(|user| !params::is_blank(user)) else {
			return Ok(None);
		};
		let token = Secret::new(token);
		let secret = api::str_field(user, "secret").map(Secret::new);

		self.session.set_bearer_token(token.clone());
		self.session.set_callback_secret(secret.clone());

		Ok(Some(AuthSession { bearer_token: token, callback_secret: secret }))
	}

	/// Exchanges the current bearer token for a fresh one.
	///
	/// Short-circuits to `None` when no token is held; no request is issued in that case. A
	/// response carrying an `error` field or lacking a token yields `None` and leaves the
	/// session untouched.
	pub async fn refresh(&self) -> Result<Option<Secret>> {
		let Some(current) = self.session.bearer_token() else { return Ok(None) };
		let params = Params::new().set("token", current.expose());
		let response = self
			.dispatch(CallKind::Refresh, Operation::Refresh, HttpMethod::Post, params, false)
			.await?;
		let Some(response) = response else { return Ok(None) };

		if response.get("error").is_some_and(|error| !params::is_blank(error)) {
			return Ok(None);
		}

		let Some(token) = api::str_field(&response, "token") else { return Ok(None) };
		let token = Secret::new(token);

		self.session.set_bearer_token(token.clone());

		Ok(Some(token))
	}

	/// Invalidates the current bearer token server-side.
	///
	/// The local token is dropped only on the server's explicit `Token invalidated`
	/// confirmation; anything else leaves the session untouched and returns `false`.
	pub async fn invalidate(&self) -> Result<bool> {
		let token =
			self.session.bearer_token().map(|token| token.expose().to_owned()).unwrap_or_default();
		let params = Params::new().set("token", token);
		let response = self
			.dispatch(CallKind::Invalidate, Operation::Invalidate, HttpMethod::Post, params, false)
			.await?;
		let Some(response) = response else { return Ok(false) };
		let confirmed = !response.get("error").is_some_and(|error| !params::is_blank(error))
			&& api::str_field(&response, "msg") == Some("Token invalidated");

		if confirmed {
			self.session.clear_bearer_token();
		}

		Ok(confirmed)
	}

	/// Fetches the authenticated user's profile.
	///
	/// The callback secret is overwritten from the profile's `secret` field on every successful
	/// fetch; a missing or empty field clears it.
	pub async fn user(&self) -> Result<Option<Value>> {
		let response = self
			.dispatch(CallKind::User, Operation::User, HttpMethod::Get, Params::new(), true)
			.await?;

		if let Some(profile) = &response {
			self.session.set_callback_secret(api::str_field(profile, "secret").map(Secret::new));
		}

		Ok(response)
	}
}
