//! Listing workflow: token selection, suggested parameters, rent estimate and
//! the submission state machine.

mod orchestrator;
mod state;

pub use orchestrator::{
    resolve_token, DepositTicket, ListingOrchestrator, PriceTicket, SubmissionTicket,
};
pub use state::SubmissionState;
