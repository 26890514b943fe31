mod reply;
mod session;

pub use reply::Reply;
pub use session::{ConversationId, Session};
