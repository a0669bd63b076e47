//! Rule compilation: grammar, lookup table, canonical name.
//!
//! [`Rule::compile`] runs the whole pipeline on a local builder and only
//! returns a value once every check has passed, so a rejected string never
//! produces a half-built rule.

mod canonical;
mod error;
pub mod letters;
pub mod map;
mod neighborhood;
pub mod parser;
mod table;

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

pub use error::RuleError;
pub use neighborhood::{
    CENTER_BIT, Direction, Neighborhood, Neighbors, PATTERN_COUNT, parity_pattern,
};
pub use table::{Role, RuleBits, RuleTable, TableBuilder};

use parser::RuleBody;

/// Longest accepted rule string, in bytes.
pub const MAX_RULE_LEN: usize = 2000;

/// Rule used when nothing else is configured.
pub const DEFAULT_RULE: &str = "LifeSuper";

/// Trail rule family selected by the rule postfix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// 26 states with decay, history and marker states.
    Super,
    /// 7 states: the classic history trail.
    History,
}

impl Family {
    #[inline]
    pub const fn postfix(self) -> &'static str {
        match self {
            Family::Super => "Super",
            Family::History => "History",
        }
    }

    /// Number of cell states, 0 included.
    #[inline]
    pub const fn state_count(self) -> usize {
        match self {
            Family::Super => 26,
            Family::History => 7,
        }
    }
}

/// A compiled rule. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub(crate) family: Family,
    pub(crate) neighborhood: Neighborhood,
    pub(crate) totalistic: bool,
    pub(crate) bits: RuleBits,
    pub(crate) map: Option<String>,
    pub(crate) bounded_grid: Option<String>,
    pub(crate) table: RuleTable,
    pub(crate) canonical: String,
}

impl Rule {
    /// Compile a rule string such as `B36/S23Super` or `LifeHistory`.
    pub fn compile(text: &str) -> Result<Self, RuleError> {
        Self::compile_with_limit(text, MAX_RULE_LEN)
    }

    /// Compile with an explicit maximum string length.
    pub fn compile_with_limit(text: &str, max_len: usize) -> Result<Self, RuleError> {
        let parsed = parser::parse(text, max_len)?;
        let mut builder = TableBuilder::new(parsed.neighborhood);

        let (map, totalistic) = match parsed.body {
            RuleBody::Map(payload) => {
                trace!("building {:?} table from MAP", parsed.neighborhood);
                builder.apply_map(&payload);
                (Some(payload), true)
            }
            RuleBody::Conditions {
                birth,
                survival,
                totalistic: true,
            } => {
                trace!("building totalistic table B{birth}/S{survival}");
                builder.apply_totalistic(&birth, Role::Birth);
                builder.apply_totalistic(&survival, Role::Survival);
                (None, true)
            }
            RuleBody::Conditions {
                birth, survival, ..
            } => {
                trace!("building isotropic table B{birth}/S{survival}");
                builder.apply_letters(&birth, Role::Birth);
                builder.apply_letters(&survival, Role::Survival);
                (None, false)
            }
        };

        let (table, bits) = builder.finish();
        if table.births_on_zero() {
            return Err(RuleError::BirthOnZero(parsed.family));
        }

        let mut rule = Rule {
            family: parsed.family,
            neighborhood: parsed.neighborhood,
            totalistic,
            bits,
            map,
            bounded_grid: parsed.bounded_grid,
            table,
            canonical: String::new(),
        };
        let (canonical, kept_letters) = canonical::render(&rule);
        rule.canonical = canonical;
        if !kept_letters {
            rule.totalistic = true;
        }

        debug!("compiled rule {text:?} as {}", rule.canonical);
        Ok(rule)
    }

    /// Unique minimal name of this rule.
    #[inline]
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    #[inline]
    pub fn family(&self) -> Family {
        self.family
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.family.state_count()
    }

    #[inline]
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Whether the canonical form uses digits only. False for MAP rules.
    #[inline]
    pub fn is_totalistic(&self) -> bool {
        self.map.is_none() && self.totalistic
    }

    /// Bit `n` set when a dead cell with `n` live neighbors may be born.
    #[inline]
    pub fn birth(&self) -> u16 {
        self.bits.counts(Role::Birth)
    }

    /// Bit `n` set when a live cell with `n` live neighbors may survive.
    #[inline]
    pub fn survival(&self) -> u16 {
        self.bits.counts(Role::Survival)
    }

    /// Letter set recorded for a digit, see [`letters::NEGATIVE_BIT`].
    #[inline]
    pub fn letters(&self, role: Role, count: u8) -> u16 {
        self.bits.letters(role, count)
    }

    /// The MAP payload, without padding, for rules given in MAP form.
    #[inline]
    pub fn map_payload(&self) -> Option<&str> {
        self.map.as_deref()
    }

    /// Bounded grid specification following the `:`, passed through as-is.
    #[inline]
    pub fn bounded_grid(&self) -> Option<&str> {
        self.bounded_grid.as_deref()
    }

    #[inline]
    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::compile(DEFAULT_RULE).expect("default rule must compile")
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_RULE, Family, Neighborhood, Role, Rule, RuleError};

    fn canon(text: &str) -> String {
        Rule::compile(text).unwrap().canonical_name().to_string()
    }

    #[test]
    fn default_rule_is_life_super() {
        let rule = Rule::default();
        assert_eq!(rule.canonical_name(), DEFAULT_RULE);
        assert_eq!(rule.family(), Family::Super);
        assert_eq!(rule.state_count(), 26);
    }

    #[test]
    fn life_aliases() {
        assert_eq!(canon("B3/S23Super"), "LifeSuper");
        assert_eq!(canon("S23/B3History"), "LifeHistory");
        assert_eq!(canon("b3s32Super"), "LifeSuper");
        assert_eq!(canon("B3/S23HSuper"), "B3/S23HSuper");
    }

    #[test]
    fn digits_are_sorted() {
        assert_eq!(canon("B63/S32History"), "B36/S23History");
        assert_eq!(canon("B2/S31VSuper"), "B2/S13VSuper");
        assert_eq!(
            Rule::compile("B2V/S31Super").unwrap_err(),
            RuleError::NeighborhoodNotLast
        );
    }

    #[test]
    fn letters_are_normalized() {
        assert_eq!(canon("B3/S2ceaik3Super"), "B3/S2-n3Super");
        assert_eq!(canon("B3ceaiknjqry/S23Super"), "LifeSuper");
        assert_eq!(canon("B3-ceaiknjqry/S23Super"), "B/S23Super");
        assert_eq!(canon("B2e3/S23History"), "B2e3/S23History");
    }

    #[test]
    fn cancelled_letters_report_totalistic() {
        let rule = Rule::compile("B3ceaiknjqry/S23Super").unwrap();
        assert!(rule.is_totalistic());
        let rule = Rule::compile("B2e3/S23Super").unwrap();
        assert!(!rule.is_totalistic());
        assert_eq!(rule.letters(Role::Birth, 2), 0b10);
    }

    #[test]
    fn bounds_are_appended() {
        assert_eq!(canon("B3/S23History:T100,50"), "LifeHistory:T100,50");
        let rule = Rule::compile("B36/S23Super:P20,20").unwrap();
        assert_eq!(rule.bounded_grid(), Some("P20,20"));
    }

    #[test]
    fn b0_is_rejected_per_family() {
        let err = Rule::compile("B0/S23Super").unwrap_err();
        assert_eq!(err, RuleError::BirthOnZero(Family::Super));
        assert_eq!(err.to_string(), "Super does not support B0.");
        let err = Rule::compile("B03/S23History").unwrap_err();
        assert_eq!(err.to_string(), "History does not support B0.");
    }

    #[test]
    fn map_rule_keeps_payload() {
        let payload = "ARYXfhZofugWaH7oaIDogBZofuhogOiAaIDogIAAgAAWaH7oaIDogGiA6ICAAIAAaIDogIAAgACAAIAAAAAAAA";
        let rule = Rule::compile(&format!("MAP{payload}Super")).unwrap();
        assert_eq!(rule.neighborhood(), Neighborhood::Moore);
        assert_eq!(rule.map_payload(), Some(payload));
        assert_eq!(rule.canonical_name(), format!("MAP{payload}Super"));
        assert!(!rule.is_totalistic());
        assert_eq!(rule.birth(), 0);
    }

    #[test]
    fn parse_and_display() {
        let rule: Rule = "B36/S23History".parse().unwrap();
        assert_eq!(rule.to_string(), "B36/S23History");
        assert_eq!(rule.birth(), (1 << 3) | (1 << 6));
        assert_eq!(rule.survival(), (1 << 2) | (1 << 3));
    }
}
