//! Rule string grammar.
//!
//! ```text
//! rule   := body family [":" bounds]
//! body   := "Life" | "MAP" base64 | conditions ["H" | "V"]
//! family := "Super" | "History"
//! ```
//!
//! `conditions` mixes `B`, `S`, `/`, `_`, digits and Hensel letters, in
//! either B/S or legacy S/B order. Matching of `Life`, `MAP` and the
//! condition characters is case-insensitive; the family postfix is not.

use super::letters;
use super::map;
use super::{Family, Neighborhood, RuleError};

/// Text of the birth and survival halves of the Life alias.
pub const LIFE_BIRTH: &str = "3";
pub const LIFE_SURVIVAL: &str = "23";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleBody {
    /// Validated payload, padding removed.
    Map(String),
    /// Digit strings per half, lower case, separators removed.
    Conditions {
        birth: String,
        survival: String,
        totalistic: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRule {
    pub family: Family,
    pub neighborhood: Neighborhood,
    pub body: RuleBody,
    pub bounded_grid: Option<String>,
}

pub fn parse(text: &str, max_len: usize) -> Result<ParsedRule, RuleError> {
    if text.len() > max_len {
        return Err(RuleError::TooLong {
            len: text.len(),
            max: max_len,
        });
    }

    let (head, bounded_grid) = match text.split_once(':') {
        Some((head, bounds)) => (head, (!bounds.is_empty()).then(|| bounds.to_string())),
        None => (text, None),
    };
    let (family, body) = split_family(head)?;
    let body = body.trim_start_matches(' ');

    let (neighborhood, body) = if let Some(rest) = strip_prefix_ignore_case(body, "life") {
        if let Some(c) = rest.chars().next() {
            return Err(RuleError::BadCharacter(c));
        }
        (
            Neighborhood::Moore,
            RuleBody::Conditions {
                birth: LIFE_BIRTH.to_string(),
                survival: LIFE_SURVIVAL.to_string(),
                totalistic: true,
            },
        )
    } else if let Some(payload) = strip_prefix_ignore_case(body, "map") {
        let (bare, nbhd) = map::validate(payload)?;
        (nbhd, RuleBody::Map(bare.to_string()))
    } else {
        parse_conditions(body)?
    };

    Ok(ParsedRule {
        family,
        neighborhood,
        body,
        bounded_grid,
    })
}

fn split_family(head: &str) -> Result<(Family, &str), RuleError> {
    let families = [Family::Super, Family::History];
    for family in families {
        if let Some(body) = head.strip_suffix(family.postfix()) {
            return Ok((family, body));
        }
    }
    if families.iter().any(|f| head.contains(f.postfix())) {
        Err(RuleError::TrailingCharacters)
    } else {
        Err(RuleError::MissingPostfix)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Lower-cased condition characters with the positions of the separators.
#[derive(Default)]
struct Scan {
    tidy: String,
    birth: Option<usize>,
    survival: Option<usize>,
    slash: Option<usize>,
    underscore: Option<usize>,
    neighborhood: Neighborhood,
    totalistic: bool,
    max_digit: u8,
}

impl Scan {
    fn mark(slot: &mut Option<usize>, at: usize, duplicate: RuleError) -> Result<(), RuleError> {
        if slot.is_some() {
            return Err(duplicate);
        }
        *slot = Some(at);
        Ok(())
    }

    fn push(&mut self, ch: char) -> Result<(), RuleError> {
        let c = ch.to_ascii_lowercase();
        let at = self.tidy.len();
        match c {
            'b' => Self::mark(&mut self.birth, at, RuleError::DuplicateBirth)?,
            's' => Self::mark(&mut self.survival, at, RuleError::DuplicateSurvival)?,
            '/' => Self::mark(&mut self.slash, at, RuleError::DuplicateSlash)?,
            '_' => Self::mark(&mut self.underscore, at, RuleError::DuplicateUnderscore)?,
            'h' | 'v' => {
                if self.neighborhood != Neighborhood::Moore {
                    return Err(RuleError::DuplicateNeighborhood);
                }
                self.neighborhood = if c == 'h' {
                    Neighborhood::Hexagonal
                } else {
                    Neighborhood::VonNeumann
                };
            }
            '-' => {
                if !matches!(self.tidy.as_bytes().last(), Some(b'0'..=b'8')) {
                    return Err(RuleError::MisplacedMinus);
                }
                self.totalistic = false;
            }
            ' ' => return Ok(()),
            '0'..='8' => self.max_digit = self.max_digit.max(c as u8 - b'0'),
            _ if c.is_ascii() && letters::letter_index(c as u8).is_some() => {
                self.totalistic = false;
            }
            _ => return Err(RuleError::BadCharacter(ch)),
        }
        self.tidy.push(c);
        Ok(())
    }
}

fn remove_char(part: &str, skip: char) -> String {
    part.chars().filter(|&c| c != skip).collect()
}

fn parse_conditions(body: &str) -> Result<(Neighborhood, RuleBody), RuleError> {
    let mut scan = Scan {
        totalistic: true,
        ..Scan::default()
    };
    for ch in body.chars() {
        scan.push(ch)?;
    }

    if scan.tidy.is_empty() {
        return Err(RuleError::Empty);
    }
    if scan.underscore.is_some() && scan.totalistic {
        return Err(RuleError::UnderscoreInTotalistic);
    }
    let nbhd = scan.neighborhood;
    if nbhd != Neighborhood::Moore {
        match scan.tidy.pop() {
            Some('h' | 'v') => {}
            _ => return Err(RuleError::NeighborhoodNotLast),
        }
    }
    if scan.max_digit > nbhd.neighbor_count() {
        return Err(RuleError::DigitTooLarge {
            digit: scan.max_digit,
            neighbors: nbhd.neighbor_count(),
        });
    }
    if let (Some(slash), Some(b), Some(s)) = (scan.slash, scan.birth, scan.survival) {
        if (b < slash) == (s < slash) {
            return Err(RuleError::BirthSurvivalSameSide);
        }
    }

    let text = scan.tidy.as_str();
    let (birth, survival) = match scan.slash {
        None => match (scan.birth, scan.survival) {
            (Some(b), Some(s)) if b < s => (text[b + 1..s].to_string(), text[s + 1..].to_string()),
            (Some(b), Some(s)) => (text[b + 1..].to_string(), text[s + 1..b].to_string()),
            (Some(_), None) => (remove_char(text, 'b'), String::new()),
            (None, _) => (String::new(), remove_char(text, 's')),
        },
        Some(slash) => {
            let (left, right) = (&text[..slash], &text[slash + 1..]);
            if scan.birth.is_some() || scan.survival.is_some() {
                let birth_first = scan.birth.is_some_and(|b| b < slash)
                    || scan.survival.is_some_and(|s| s > slash);
                let (b, s) = if birth_first { (left, right) } else { (right, left) };
                (remove_char(b, 'b'), remove_char(s, 's'))
            } else {
                // S/B order without letters.
                (right.to_string(), left.to_string())
            }
        }
    };
    let birth = remove_char(&birth, '_');
    let survival = remove_char(&survival, '_');

    if !scan.totalistic {
        if !starts_with_digit(&birth) {
            return Err(RuleError::BirthStartsWithLetter);
        }
        if !starts_with_digit(&survival) {
            return Err(RuleError::SurvivalStartsWithLetter);
        }
        if nbhd != Neighborhood::Moore {
            return Err(RuleError::NonTotalisticNeighborhood);
        }
    }
    if !letters_valid(&birth) {
        return Err(RuleError::InvalidBirthLetter);
    }
    if !letters_valid(&survival) {
        return Err(RuleError::InvalidSurvivalLetter);
    }

    Ok((
        nbhd,
        RuleBody::Conditions {
            birth,
            survival,
            totalistic: scan.totalistic,
        },
    ))
}

/// Empty halves count as starting with a digit.
fn starts_with_digit(part: &str) -> bool {
    part.bytes().next().is_none_or(|c| (b'0'..=b'8').contains(&c))
}

/// Every letter must be defined for the digit it follows.
fn letters_valid(part: &str) -> bool {
    let mut count = None;
    for c in part.bytes() {
        match c {
            b'0'..=b'8' => count = Some(c - b'0'),
            b'-' => {}
            _ => {
                if !count.is_some_and(|n| letters::letter_valid(n, c)) {
                    return false;
                }
            }
        }
    }
    true
}
