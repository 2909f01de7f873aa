mod app_state;
mod bubble;
mod chat_controller;
mod conversation_logger;
pub mod events;
mod history_list;
mod markdown;
mod preferences;
mod progress_simulator;
mod sales_reps;
mod scheduler;
mod scroll;
mod syntaxes;

pub use app_state::*;
pub use bubble::*;
pub use chat_controller::*;
pub use conversation_logger::*;
pub use history_list::*;
pub use markdown::*;
pub use preferences::*;
pub use progress_simulator::*;
pub use sales_reps::*;
pub use scheduler::*;
pub use scroll::*;
pub use syntaxes::*;
