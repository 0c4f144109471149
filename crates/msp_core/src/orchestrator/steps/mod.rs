//! Pipeline step implementations.

mod discover;
mod encode;
mod mux;

pub use discover::DiscoverStep;
pub use encode::EncodeStep;
pub use mux::MuxStep;
