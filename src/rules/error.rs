use thiserror::Error;

use super::Family;

/// Reasons a rule string is rejected.
///
/// Messages are meant to be shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule name is too long.")]
    TooLong { len: usize, max: usize },

    #[error("Missing Super or History postfix.")]
    MissingPostfix,

    #[error("Illegal trailing characters after postfix.")]
    TrailingCharacters,

    #[error("Rule cannot be empty string.")]
    Empty,

    #[error("Bad character found.")]
    BadCharacter(char),

    #[error("Only one B allowed.")]
    DuplicateBirth,

    #[error("Only one S allowed.")]
    DuplicateSurvival,

    #[error("Only one slash allowed.")]
    DuplicateSlash,

    #[error("Only one underscore allowed.")]
    DuplicateUnderscore,

    #[error("Only one neighborhood allowed.")]
    DuplicateNeighborhood,

    #[error("Minus can only follow a digit.")]
    MisplacedMinus,

    #[error("Underscore not valid for totalistic rules, use slash.")]
    UnderscoreInTotalistic,

    #[error("Neighborhood must be at end of rule.")]
    NeighborhoodNotLast,

    #[error("Digit greater than neighborhood allows.")]
    DigitTooLarge { digit: u8, neighbors: u8 },

    #[error("B and S must be either side of slash.")]
    BirthSurvivalSameSide,

    #[error("Non-totalistic birth must start with a digit.")]
    BirthStartsWithLetter,

    #[error("Non-totalistic survival must start with a digit.")]
    SurvivalStartsWithLetter,

    #[error("Non-totalistic only supported with Moore neighborhood.")]
    NonTotalisticNeighborhood,

    #[error("Letter not valid for birth neighbor count.")]
    InvalidBirthLetter,

    #[error("Letter not valid for survival neighbor count.")]
    InvalidSurvivalLetter,

    #[error("MAP rule needs 6, 22 or 86 base64 characters.")]
    MapLength(usize),

    #[error("MAP contains illegal base64 character.")]
    MapCharacter(char),

    #[error("{} does not support B0.", .0.postfix())]
    BirthOnZero(Family),
}
