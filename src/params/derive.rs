use rust_decimal::Decimal;
use tracing::debug;

use super::rounding::round_to_one_significant_digit;
use crate::types::{smallest_unit, DerivedSuggestion, ReferencePrice};

/// Target tick size as a fraction of price (0.001%)
pub const TICK_TO_PRICE_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 5);

/// Suggest a lot size and tick size for a market trading at `price`.
///
/// The lot size is the inverse of price rounded to one significant digit, so a
/// single lot is worth about one quote token. The tick size is five orders of
/// magnitude below price, clamped to the quote token's smallest unit.
///
/// Returns `None` when no price is available or the price is too extreme for
/// either value to be represented.
pub fn derive_suggestion(
    price: Option<&ReferencePrice>,
    base_decimals: u8,
    quote_decimals: u8,
) -> Option<DerivedSuggestion> {
    let price = price?.value();

    let lot_size = Decimal::ONE
        .checked_div(price)
        .and_then(round_to_one_significant_digit);
    let Some(lot_size) = lot_size else {
        debug!(%price, "price out of range for a lot size suggestion");
        return None;
    };

    let min_tick = smallest_unit(quote_decimals);
    let tick_size = price
        .checked_mul(TICK_TO_PRICE_RATIO)
        .and_then(round_to_one_significant_digit)
        .filter(|tick| *tick >= min_tick)
        .unwrap_or(min_tick);

    if lot_size < smallest_unit(base_decimals) {
        debug!(
            %lot_size,
            base_decimals,
            "suggested lot size is finer than one base token unit"
        );
    }

    Some(DerivedSuggestion {
        lot_size,
        tick_size,
    })
}
