use std::{
    borrow::Cow,
    fmt::{self, Debug, Display},
};

use serde::{Deserialize, Deserializer, Serialize};

/// ISO-like currency code, normalised to upper case (eg/ "USD", "EUR").
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CurrencyCode(Cow<'static, str>);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(Cow::Borrowed("USD"));

    pub fn new<S>(code: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        let code = code.into();
        if code.chars().any(|c| c.is_ascii_lowercase()) {
            Self(Cow::Owned(code.to_ascii_uppercase()))
        } else {
            Self(code)
        }
    }
}

impl<S> From<S> for CurrencyCode
where
    S: Into<Cow<'static, str>>,
{
    fn from(input: S) -> Self {
        Self::new(input)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<CurrencyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(CurrencyCode::new)
    }
}

/// Weight unit code, normalised to lower case (eg/ "oz", "g", "tola").
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnitCode(Cow<'static, str>);

impl UnitCode {
    pub const TROY_OUNCE: UnitCode = UnitCode(Cow::Borrowed("oz"));

    pub fn new<S>(code: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        let code = code.into();
        if code.chars().any(|c| c.is_ascii_uppercase()) {
            Self(Cow::Owned(code.to_ascii_lowercase()))
        } else {
            Self(code)
        }
    }
}

impl<S> From<S> for UnitCode
where
    S: Into<Cow<'static, str>>,
{
    fn from(input: S) -> Self {
        Self::new(input)
    }
}

impl AsRef<str> for UnitCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Debug for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UnitCode {
    fn deserialize<D>(deserializer: D) -> Result<UnitCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(UnitCode::new)
    }
}
