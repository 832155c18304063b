pub mod audit;
pub mod browse;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod products;
pub mod routes;
pub mod session;

pub use routes::create_router;
