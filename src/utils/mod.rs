mod id;
pub mod time;

pub use id::longid;
