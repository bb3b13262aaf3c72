pub mod config;
pub mod error;
pub mod state;
pub mod service;
pub mod handlers;
pub mod routes;
pub mod middleware;
pub mod router;

pub use router::build_router;
pub use service::ChatService;
pub use state::AppState;
