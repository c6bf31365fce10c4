//! Domain logic for fete: prompt templating, the chat-gateway client,
//! extraction of generated themes/plans from model replies, budget math,
//! and the generate-and-persist flows.

pub mod cost;
pub mod extract;
pub mod gateway;
pub mod planner;
pub mod prompt;
