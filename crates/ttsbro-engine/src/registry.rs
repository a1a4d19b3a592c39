use crate::engine_trait::SynthesisEngine;
use ttsbro_core::{EngineError, FactoryRegistry};

/// Engines selectable by `[engine] name`.
pub struct EngineRegistry {
    engines: FactoryRegistry<dyn SynthesisEngine>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        let mut engines = FactoryRegistry::<dyn SynthesisEngine>::new();
        engines.register("null", || Box::new(crate::null_engine::NullEngine::new()));
        #[cfg(feature = "kokoro")]
        engines.register("kokoro", || {
            Box::new(crate::kokoro_engine::KokoroEngine::new())
        });
        Self { engines }
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn SynthesisEngine>) {
        self.engines.register(name, factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn SynthesisEngine>, EngineError> {
        self.engines
            .create(name)
            .ok_or_else(|| EngineError::EngineNotFound(name.to_string()))
    }

    pub fn list_engines(&self) -> Vec<&str> {
        self.engines.names()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
