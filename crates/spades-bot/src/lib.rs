#![deny(warnings)]
pub mod bot;
pub mod policy;

pub use bot::{BidPlanner, BotContext, BotParams, BotView, CardMemory, PlayPlanner};
pub use policy::{BidDecision, HeuristicPolicy, Policy, PolicyContext};
