// Moderation decision and human review.
//
// The decision state machine is pure; the confirmation workflow wires it
// to the removal service. Warning is the only state the review actions
// accept, and the only way out of it is a Resolved outcome.

pub mod removal;
pub mod state;
