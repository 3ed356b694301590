//! Identity endpoint types.
//!
//! Everything here mirrors the JSON body of `GET /api/player/token/me`:
//!
//! ```json
//! { "player": { "username": "alice", ... }, "expiration": 1234567890 }
//! ```
//!
//! Both fields may be missing or `null`. Neither is validated: the player
//! record and the expiration are passed through to the session store
//! exactly as the backend sent them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::is_truthy;

/// Path of the identity endpoint, relative to the front-end origin.
pub const IDENTITY_PATH: &str = "/api/player/token/me";

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The authenticated player, as returned by the backend.
///
/// The record is opaque: we wrap the raw JSON value instead of picking
/// fields out of it, so whatever the backend sends survives a round trip
/// through the store untouched. The only thing the UI reads is
/// [`username`](Self::username).
///
/// `#[serde(transparent)]` serializes this as the inner value, so a
/// `Player` wrapping `{"username": "alice"}` is written back out as
/// exactly that object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player(Value);

impl Player {
    /// Wraps a raw JSON value as a player record.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Returns the `username` field if it is present and a string.
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    /// The name to greet the player with.
    ///
    /// Falls back to an empty string when `username` is missing or falsy
    /// (`null`, `""`, `0`, `false`). Non-string truthy scalars are printed
    /// as-is. Arrays and objects have no sensible display form and also
    /// give an empty name.
    pub fn display_name(&self) -> String {
        match self.0.get("username") {
            Some(value) if is_truthy(value) => match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => String::new(),
            },
            _ => String::new(),
        }
    }

    /// Borrows the raw record.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the player and returns the raw record.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.username() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "<anonymous>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Expiration
// ---------------------------------------------------------------------------

/// When the current session token expires.
///
/// The backend has sent both unix timestamps and formatted date strings
/// over time, so we accept either and keep whatever we got. `Other`
/// catches any remaining JSON shape so an unexpected expiration never
/// turns a successful sign-in into a decode failure.
///
/// `#[serde(untagged)]` tries each variant in order and picks the first
/// that matches. `null` never reaches this enum: `Option<Expiration>`
/// maps it to `None` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expiration {
    /// A numeric timestamp, kept with its original precision.
    Number(serde_json::Number),
    /// A textual timestamp (e.g. ISO 8601).
    Text(String),
    /// Anything else the backend decided to send.
    Other(Value),
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Expiration {
    fn from(secs: i64) -> Self {
        Self::Number(secs.into())
    }
}

// ---------------------------------------------------------------------------
// IdentityResponse
// ---------------------------------------------------------------------------

/// The body of a successful identity request.
///
/// `#[serde(default)]` on each field means a missing key deserializes
/// to `None`, same as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// The player record, if the session resolved to one.
    #[serde(default)]
    pub player: Option<Value>,

    /// When the session expires.
    #[serde(default)]
    pub expiration: Option<Expiration>,
}

impl IdentityResponse {
    /// Builds a response for a signed-in player.
    pub fn signed_in(player: Value, expiration: Option<Expiration>) -> Self {
        Self {
            player: Some(player),
            expiration,
        }
    }

    /// Builds a response with no player.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// `true` iff the `player` field is truthy.
    pub fn is_signed_in(&self) -> bool {
        self.player.as_ref().is_some_and(is_truthy)
    }

    /// Splits the response into the three values the session store holds:
    /// `(signed_in, player, session_expiration)`.
    ///
    /// The player is only kept when it is truthy, so `signed_in` and
    /// `player.is_some()` always agree.
    pub fn into_session_parts(self) -> (bool, Option<Player>, Option<Expiration>) {
        let signed_in = self.is_signed_in();
        let player = if signed_in {
            self.player.map(Player::from_value)
        } else {
            None
        };
        (signed_in, player, self.expiration)
    }
}
