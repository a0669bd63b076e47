//! Host-facing engine holding the active rule.

use log::debug;

use crate::State;
use crate::rules::{DEFAULT_RULE, MAX_RULE_LEN, Neighbors, Rule, RuleError};

/// Configuration for a [`SuperAlgo`] instance.
///
/// `SuperAlgoConfig::default()` gives `LifeSuper` and the standard length
/// limit; the builder methods override individual knobs.
#[derive(Clone, Debug, Default)]
pub struct SuperAlgoConfig {
    /// Rule compiled at construction. `None` means [`DEFAULT_RULE`].
    pub default_rule: Option<String>,
    /// Longest accepted rule string. `None` means [`MAX_RULE_LEN`].
    pub max_rule_len: Option<usize>,
}

impl SuperAlgoConfig {
    /// Start from a different rule.
    pub fn default_rule(mut self, rule: impl Into<String>) -> Self {
        self.default_rule = Some(rule.into());
        self
    }

    /// Set the maximum rule string length.
    pub fn max_rule_len(mut self, len: usize) -> Self {
        self.max_rule_len = Some(len.max(1));
        self
    }
}

/// Rule holder answering per-cell queries for a grid host.
///
/// The active rule is replaced only by a successful [`set_rule`]; a
/// rejected string leaves it untouched.
///
/// [`set_rule`]: SuperAlgo::set_rule
#[derive(Clone, Debug)]
pub struct SuperAlgo {
    rule: Rule,
    max_rule_len: usize,
}

impl Default for SuperAlgo {
    fn default() -> Self {
        Self::new()
    }
}

impl SuperAlgo {
    pub fn new() -> Self {
        Self {
            rule: Rule::default(),
            max_rule_len: MAX_RULE_LEN,
        }
    }

    /// Create an engine from explicit configuration.
    pub fn with_config(config: SuperAlgoConfig) -> Result<Self, RuleError> {
        let max_rule_len = config.max_rule_len.unwrap_or(MAX_RULE_LEN);
        let text = config.default_rule.as_deref().unwrap_or(DEFAULT_RULE);
        let rule = Rule::compile_with_limit(text, max_rule_len)?;
        Ok(Self { rule, max_rule_len })
    }

    /// The rule a fresh engine starts with.
    pub fn default_rule() -> &'static str {
        DEFAULT_RULE
    }

    /// Compile `text` and make it the active rule.
    pub fn set_rule(&mut self, text: &str) -> Result<&Rule, RuleError> {
        match Rule::compile_with_limit(text, self.max_rule_len) {
            Ok(rule) => {
                self.rule = rule;
                Ok(&self.rule)
            }
            Err(err) => {
                debug!("rejected rule {text:?}: {err}; keeping {}", self.rule);
                Err(err)
            }
        }
    }

    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    pub fn canonical_name(&self) -> &str {
        self.rule.canonical_name()
    }

    #[inline]
    pub fn num_cell_states(&self) -> usize {
        self.rule.state_count()
    }

    #[inline]
    pub fn next_state(&self, center: State, neighbors: &Neighbors) -> State {
        self.rule.next_state(center, neighbors)
    }
}
