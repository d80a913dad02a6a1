//! Shapes exchanged with the external decision engine.

mod request;
mod response;

pub use request::{
    build_request_contract, BudgetBand, ContractTask, DateContext, DecisionRequest, KnownFacts,
    PolicyDirectives, RequestConstraints, RequestContract, RequestScope, TrackingContext,
    UserContext,
};
pub use response::{Decision, DecisionOutput, DecisionResponse, DecisionTradeoffs, Refusal};
