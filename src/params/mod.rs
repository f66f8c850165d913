mod derive;
mod rounding;
mod units;

pub use derive::{derive_suggestion, TICK_TO_PRICE_RATIO};
pub use rounding::{decimal_exponent, decimal_to_units, round_to_one_significant_digit};
pub use units::{convert, parse_amount, parse_lot_sizes, to_integer_units, Field, InputInvalid};
