pub mod pagination;
pub mod response;
pub mod state;

pub use pagination::{Page, PageLimits, PageQuery};
pub use response::MessageResponse;
pub use state::AppState;
