//! Build-time configuration.

/// API origin, read at compile time from `TRENDBOARD_API_BASE`.
#[cfg(not(feature = "mock"))]
pub const API_BASE: &str = match option_env!("TRENDBOARD_API_BASE") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Mock builds never reach the network.
#[cfg(feature = "mock")]
pub const API_BASE: &str = "mock://trendboard";

/// localStorage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// localStorage key of the signed-in user as JSON.
pub const USER_KEY: &str = "user";
