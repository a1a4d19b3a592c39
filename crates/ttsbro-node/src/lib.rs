pub mod node;
pub mod params;

pub use node::{NodeOptions, TtsNode};
pub use params::resolve_request;
