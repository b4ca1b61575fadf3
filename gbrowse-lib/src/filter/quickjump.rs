//! Quick-jump targets

use serde::Deserialize;
use serde::Serialize;

/// First-letter index target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuickJump {
    /// No quick-jump filter.
    #[default]
    All,
    /// Rows starting with any digit.
    Digits,
    /// Rows starting with this letter, either case.
    Letter(char),
}

impl QuickJump {
    /// Parses the link parameter form: `""`, `"0"` or a single letter.
    ///
    /// Anything else is not a target.
    pub fn from_param(param: &str) -> Option<Self> {
        let mut chars = param.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Some(QuickJump::All),
            (Some('0'), None) => Some(QuickJump::Digits),
            (Some(c), None) if c.is_ascii_alphabetic() => Some(QuickJump::Letter(c.to_ascii_uppercase())),
            _ => None,
        }
    }

    /// The link parameter form of this target.
    pub fn as_param(&self) -> String {
        match self {
            QuickJump::All => String::new(),
            QuickJump::Digits => "0".to_string(),
            QuickJump::Letter(c) => c.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, QuickJump::All)
    }

    /// Prefixes a matching value may start with.
    pub(crate) fn prefixes(&self) -> Vec<char> {
        match self {
            QuickJump::All => Vec::new(),
            QuickJump::Digits => ('0'..='9').collect(),
            QuickJump::Letter(c) => vec![*c],
        }
    }
}
