//! Application-wide constants

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;
pub const DEFAULT_COOKIE_NAME: &str = "music_vote.sid";
pub const DEFAULT_SESSION_SECRET: &str = "music-vote-secret-key";
pub const TOKEN_PARAM: &str = "token";
pub const ERROR_PARAM: &str = "error";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
