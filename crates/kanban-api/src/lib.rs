pub mod cards;
pub mod colors;
pub mod comments;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, AppStateInner};
