pub mod schema;

#[allow(unused_imports)]
pub use schema::{ChatConfig, Config, GuardConfig, MemoryConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexported_config_default_is_constructible() {
        let config = Config::default();

        assert!(config.default_provider.is_some());
        assert!(config.default_model.is_some());
        assert!(config.default_temperature > 0.0);
        assert_eq!(config.memory, MemoryConfig::default());
        assert_eq!(config.guard, GuardConfig::default());
        assert_eq!(config.chat, ChatConfig::default());
    }
}
