/// Email used by the default user fixture
pub static TEST_USER_EMAIL: &str = "player@example.com";
/// Placeholder stored in the password column of fixture users, never a valid hash
pub static TEST_PASSWORD_PLACEHOLDER: &str = "not-a-password-hash";
/// Text attached to fixture check-ins
pub static TEST_CHECKIN_TEXT: &str = "Found it!";

/// Latitude of the default fixture location
pub const TEST_LAT: f64 = 51.5007;
/// Longitude of the default fixture location
pub const TEST_LNG: f64 = -0.1246;
