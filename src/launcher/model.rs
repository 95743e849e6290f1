//! Wire payload types for the DZSA launcher query API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response envelope from a launcher query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    /// The server listing.
    pub result: ServerInfo,
    /// Status code reported inside the payload.
    pub status: i32,
}

/// The game endpoint of a listed server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEndpoint {
    /// External IP address.
    pub ip: String,
    /// Query port.
    pub port: u16,
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// A workshop mod installed on a listed server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerMod {
    /// Mod display name.
    pub name: String,
    /// Steam workshop item id.
    pub steam_workshop_id: i64,
}

/// One server's listing as returned by the launcher directory.
///
/// Stored as-is per port after every successful sync; the fields beyond
/// `name` and `players` are passed through to API consumers untouched.
/// All fields default when absent, matching the directory's habit of
/// omitting keys it has no data for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerInfo {
    pub battl_eye: bool,
    pub endpoint: ServerEndpoint,
    pub environment: String,
    pub first_person_only: bool,
    pub folder: String,
    pub game: String,
    pub game_port: u16,
    pub map: String,
    pub max_players: i32,
    pub mission: String,
    pub mods: Vec<ServerMod>,
    pub name: String,
    pub name_override: bool,
    pub password: bool,
    pub players: i32,
    pub profile: bool,
    pub shard: String,
    pub sponsor: bool,
    pub time: String,
    pub time_acceleration: i32,
    pub vac: bool,
    pub version: String,
}
