use rust_decimal::Decimal;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use super::rounding::decimal_to_units;
use crate::types::{IntegerUnits, LotSizes};

/// Form field an input problem refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LotSize,
    TickSize,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::LotSize => "lot size",
            Field::TickSize => "tick size",
        }
    }
}

/// Why a lot/tick size input cannot become on-chain units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputInvalid {
    /// Field is blank
    Empty(Field),
    /// Text is not a decimal number
    NotANumber(Field),
    /// Value is zero or negative
    NotPositive(Field),
    /// Value is smaller than one on-chain unit
    RoundsToZero(Field),
    /// Value does not fit in a 64-bit unit count
    OutOfRange(Field),
}

impl InputInvalid {
    pub fn field(&self) -> Field {
        match self {
            InputInvalid::Empty(f)
            | InputInvalid::NotANumber(f)
            | InputInvalid::NotPositive(f)
            | InputInvalid::RoundsToZero(f)
            | InputInvalid::OutOfRange(f) => *f,
        }
    }
}

impl fmt::Display for InputInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputInvalid::Empty(field) => write!(f, "{} is required", field.as_str()),
            InputInvalid::NotANumber(field) => write!(f, "{} is not a number", field.as_str()),
            InputInvalid::NotPositive(field) => {
                write!(f, "{} must be greater than zero", field.as_str())
            }
            InputInvalid::RoundsToZero(field) => {
                write!(f, "{} is smaller than one token unit", field.as_str())
            }
            InputInvalid::OutOfRange(field) => write!(f, "{} is too large", field.as_str()),
        }
    }
}

impl std::error::Error for InputInvalid {}

/// Parse a free-form amount, accepting plain (`0.01`) and scientific (`1e-5`) notation
pub fn parse_amount(text: &str, field: Field) -> Result<Decimal, InputInvalid> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputInvalid::Empty(field));
    }

    let value = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| InputInvalid::NotANumber(field))?;

    if value <= Decimal::ZERO {
        return Err(InputInvalid::NotPositive(field));
    }
    Ok(value)
}

fn to_lot_units(amount: Decimal, decimals: u8, field: Field) -> Result<NonZeroU64, InputInvalid> {
    let units = decimal_to_units(amount, decimals).ok_or(InputInvalid::OutOfRange(field))?;
    NonZeroU64::new(units).ok_or(InputInvalid::RoundsToZero(field))
}

/// Convert parsed lot and tick sizes into on-chain lot sizes.
///
/// `base_lot_size = round(lot_size * 10^base_decimals)` and
/// `quote_lot_size = round(lot_size * tick_size * 10^quote_decimals)`, both
/// rounded half away from zero.
pub fn convert(
    lot_size: Decimal,
    tick_size: Decimal,
    base_decimals: u8,
    quote_decimals: u8,
) -> Result<LotSizes, InputInvalid> {
    if lot_size <= Decimal::ZERO {
        return Err(InputInvalid::NotPositive(Field::LotSize));
    }
    if tick_size <= Decimal::ZERO {
        return Err(InputInvalid::NotPositive(Field::TickSize));
    }

    let base_lot_size = to_lot_units(lot_size, base_decimals, Field::LotSize)?;
    let quote_per_lot = lot_size
        .checked_mul(tick_size)
        .ok_or(InputInvalid::OutOfRange(Field::TickSize))?;
    let quote_lot_size = to_lot_units(quote_per_lot, quote_decimals, Field::TickSize)?;

    Ok(LotSizes {
        base_lot_size,
        quote_lot_size,
    })
}

/// Parse and convert form text in one step
pub fn parse_lot_sizes(
    lot_size_text: &str,
    tick_size_text: &str,
    base_decimals: u8,
    quote_decimals: u8,
) -> Result<LotSizes, InputInvalid> {
    let lot_size = parse_amount(lot_size_text, Field::LotSize)?;
    let tick_size = parse_amount(tick_size_text, Field::TickSize)?;
    convert(lot_size, tick_size, base_decimals, quote_decimals)
}

/// Integer units for display gating; never fails.
///
/// An invalid lot size zeroes both fields. A valid lot size with an invalid
/// tick size keeps `base_lot_units` and zeroes `quote_lot_units`.
pub fn to_integer_units(
    lot_size_text: &str,
    tick_size_text: &str,
    base_decimals: u8,
    quote_decimals: u8,
) -> IntegerUnits {
    let base_lot_units = match parse_amount(lot_size_text, Field::LotSize)
        .and_then(|lot| to_lot_units(lot, base_decimals, Field::LotSize))
    {
        Ok(units) => units.get(),
        Err(_) => return IntegerUnits::default(),
    };

    let quote_lot_units = parse_lot_sizes(lot_size_text, tick_size_text, base_decimals, quote_decimals)
        .map(|sizes| sizes.quote_lot_size.get())
        .unwrap_or(0);

    IntegerUnits {
        base_lot_units,
        quote_lot_units,
    }
}
