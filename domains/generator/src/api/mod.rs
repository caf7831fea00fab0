pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::GeneratorState;
pub use routes::routes;
