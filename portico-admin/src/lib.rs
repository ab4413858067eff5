pub mod error;
pub mod facade;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use facade::AdminFacade;
pub use server::{AdminState, build_admin_router, start_admin};
