use serde::{Deserialize, Serialize};

/// Request body for registration and login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Request body for setting the default city.
#[derive(Debug, Deserialize)]
pub struct DefaultCityRequest {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

/// Returned after login. The username doubles as the identity marker the
/// front end keeps; there is no token or cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}
