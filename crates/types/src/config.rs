use arrowlog_array::{system_allocator, AllocatorRef, BuilderOptions, LimitedAllocator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SerializerConfig {
    /// Upper bound for the memory held by builders at any moment.
    /// Unlimited when not set.
    pub memory_limit: Option<usize>,
    pub builder: BuilderOptions
}


impl SerializerConfig {
    pub fn allocator(&self) -> AllocatorRef {
        match self.memory_limit {
            Some(limit) => Arc::new(LimitedAllocator::new(limit)),
            None => system_allocator()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_config() -> anyhow::Result<()> {
        let config: SerializerConfig = serde_json::from_str(r#"{"memoryLimit": 4096}"#)?;
        assert_eq!(config.memory_limit, Some(4096));
        assert_eq!(config.builder.list_len_hint, 2);

        let config: SerializerConfig = serde_json::from_str(r#"{"builder": {"listLenHint": 8}}"#)?;
        assert_eq!(config.memory_limit, None);
        assert_eq!(config.builder.list_len_hint, 8);

        assert!(serde_json::from_str::<SerializerConfig>(r#"{"limit": 1}"#).is_err());
        Ok(())
    }
}
