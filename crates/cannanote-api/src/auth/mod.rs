// Session authentication: access gate and signup/login/logout routes

pub mod gate;
pub mod routes;

pub use gate::{allow, require_session, CurrentSession, SESSION_COOKIE};
pub use routes::routes;
