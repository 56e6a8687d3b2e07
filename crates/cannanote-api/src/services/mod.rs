// Services layer for business logic
// Services own the domain rules and call the stores through their traits

pub mod auth;
pub mod entry;

pub use auth::{AuthService, Credentials};
pub use entry::EntryService;
