pub mod handlers;
pub mod middleware;
pub mod playlists;
pub mod routes;

pub use routes::create_router;
