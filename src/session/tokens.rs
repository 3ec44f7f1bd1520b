use std::collections::HashMap;

use crate::models::Provider;

/// Sandbox access tokens, at most one per provider for the life of the process.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<Provider, String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self, provider: Provider) -> Option<&str> {
        self.tokens.get(&provider).map(String::as_str)
    }

    /// Store a token for `provider`. An existing token is kept; the stored
    /// token is returned either way.
    pub fn store(&mut self, provider: Provider, token: String) -> &str {
        self.tokens.entry(provider).or_insert(token).as_str()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_lookup() {
        let mut registry = TokenRegistry::new();
        assert!(registry.token(Provider::Gusto).is_none());

        assert_eq!(registry.store(Provider::Gusto, "tok1".into()), "tok1");
        assert_eq!(registry.token(Provider::Gusto), Some("tok1"));
        assert!(registry.token(Provider::Workday).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_first_token_wins() {
        let mut registry = TokenRegistry::new();
        registry.store(Provider::Justworks, "first".into());
        assert_eq!(registry.store(Provider::Justworks, "second".into()), "first");
        assert_eq!(registry.token(Provider::Justworks), Some("first"));
        assert_eq!(registry.len(), 1);
    }
}
