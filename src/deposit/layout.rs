use serde::{Deserialize, Serialize};

/// Padding every DEX account carries: 5 bytes before the data, 7 after
pub const ACCOUNT_PADDING: u64 = 5 + 7;

pub const EVENT_QUEUE_HEADER_SIZE: u64 = 32;
pub const EVENT_SIZE: u64 = 88;

pub const REQUEST_QUEUE_HEADER_SIZE: u64 = 32;
pub const REQUEST_SIZE: u64 = 80;

pub const ORDERBOOK_HEADER_SIZE: u64 = 40;
pub const ORDERBOOK_NODE_SIZE: u64 = 72;

/// Capacities of the queue and book accounts allocated for a new market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralConstants {
    /// Slab nodes in each side of the order book
    pub price_levels: u32,
    /// Events the event queue can hold
    pub event_queue_depth: u32,
    /// Requests the request queue can hold
    pub request_queue_depth: u32,
}

impl Default for StructuralConstants {
    fn default() -> Self {
        Self {
            price_levels: 909,
            event_queue_depth: 2978,
            request_queue_depth: 63,
        }
    }
}

pub fn event_queue_size(depth: u32) -> u64 {
    EVENT_QUEUE_HEADER_SIZE + u64::from(depth) * EVENT_SIZE + ACCOUNT_PADDING
}

pub fn request_queue_size(depth: u32) -> u64 {
    REQUEST_QUEUE_HEADER_SIZE + u64::from(depth) * REQUEST_SIZE + ACCOUNT_PADDING
}

pub fn orderbook_size(price_levels: u32) -> u64 {
    ORDERBOOK_HEADER_SIZE + u64::from(price_levels) * ORDERBOOK_NODE_SIZE + ACCOUNT_PADDING
}

/// Byte sizes of the accounts a market needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSizes {
    pub event_queue: u64,
    pub request_queue: u64,
    pub bids: u64,
    pub asks: u64,
}

impl AccountSizes {
    pub fn for_constants(constants: &StructuralConstants) -> Self {
        let book = orderbook_size(constants.price_levels);
        Self {
            event_queue: event_queue_size(constants.event_queue_depth),
            request_queue: request_queue_size(constants.request_queue_depth),
            bids: book,
            asks: book,
        }
    }

    pub fn total(&self) -> u64 {
        self.event_queue + self.request_queue + self.bids + self.asks
    }
}
