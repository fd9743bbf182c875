//! Sensitivity categories for masking decisions.

use serde::{Deserialize, Serialize};

/// Category of a sensitive field.
///
/// The set is closed: each variant selects exactly one masking rule in
/// [`crate::convert`]. The canonical name of a variant is its
/// `SCREAMING_SNAKE_CASE` spelling, e.g. `MOBILE_PHONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitiveType {
    /// Personal name (keeps the first character)
    ChineseName,
    /// Identity document number
    IdCard,
    /// Landline number (keeps the last four digits)
    FixedPhone,
    /// Mobile number
    MobilePhone,
    /// Postal address
    Address,
    /// Email address (keeps the top-level domain)
    Email,
    /// Bank card number
    BankCard,
    /// Bank name (keeps the first four characters)
    BankName,
    /// Bank branch (CNAPS) or unified credit code
    CnapsCode,
    /// Bank card expiry date
    BankCardDate,
    /// Hide everything behind a fixed placeholder
    All,
    /// Drop the value, keep the surrounding structure
    Null,
}

impl SensitiveType {
    /// Every category, in declaration order.
    pub const VARIANTS: [SensitiveType; 12] = [
        SensitiveType::ChineseName,
        SensitiveType::IdCard,
        SensitiveType::FixedPhone,
        SensitiveType::MobilePhone,
        SensitiveType::Address,
        SensitiveType::Email,
        SensitiveType::BankCard,
        SensitiveType::BankName,
        SensitiveType::CnapsCode,
        SensitiveType::BankCardDate,
        SensitiveType::All,
        SensitiveType::Null,
    ];

    /// Returns the canonical, case-sensitive name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            SensitiveType::ChineseName => "CHINESE_NAME",
            SensitiveType::IdCard => "ID_CARD",
            SensitiveType::FixedPhone => "FIXED_PHONE",
            SensitiveType::MobilePhone => "MOBILE_PHONE",
            SensitiveType::Address => "ADDRESS",
            SensitiveType::Email => "EMAIL",
            SensitiveType::BankCard => "BANK_CARD",
            SensitiveType::BankName => "BANK_NAME",
            SensitiveType::CnapsCode => "CNAPS_CODE",
            SensitiveType::BankCardDate => "BANK_CARD_DATE",
            SensitiveType::All => "ALL",
            SensitiveType::Null => "NULL",
        }
    }

    /// Resolve a category from its canonical name, ignoring case.
    pub fn by_name_ignore_case(name: &str) -> Option<Self> {
        Self::VARIANTS
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Apply this category's masking rule to `value`.
    pub fn mask(&self, value: &str) -> String {
        crate::convert::convert_msg(*self, value)
    }
}

impl std::fmt::Display for SensitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SensitiveType {
    type Err = crate::MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name_ignore_case(s)
            .ok_or_else(|| crate::MaskError::UnknownSensitiveType(s.to_string()))
    }
}
