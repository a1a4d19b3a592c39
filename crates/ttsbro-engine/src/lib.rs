pub mod bundle;
pub mod engine_trait;
#[cfg(feature = "kokoro")]
pub mod kokoro_engine;
pub mod null_engine;
pub mod registry;
pub mod service;

pub use bundle::ModelBundle;
pub use engine_trait::SynthesisEngine;
#[cfg(feature = "kokoro")]
pub use kokoro_engine::KokoroEngine;
pub use null_engine::NullEngine;
pub use registry::EngineRegistry;
pub use service::SynthesisService;
