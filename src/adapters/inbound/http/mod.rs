pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::{UndeleteLayer, UndeleteMiddleware};
pub use router::{AppState, create_router};
