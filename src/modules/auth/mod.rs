pub mod controller;
pub mod router;
pub mod service;

pub use router::{init_protected_auth_router, init_public_auth_router};
pub use service::AuthService;
