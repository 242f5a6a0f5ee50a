pub mod net;
pub mod slug;
pub mod time;
