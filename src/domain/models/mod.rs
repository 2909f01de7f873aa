mod author;
mod backend;
mod chat_state;
mod conversation;
mod event;
mod loading;
mod log_event;
mod log_sink;
mod palette;
mod preferences;
mod progress;
mod sales_rep;
mod section;
mod slash_commands;
mod textarea;

pub use author::*;
pub use backend::*;
pub use chat_state::*;
pub use conversation::*;
pub use event::*;
pub use loading::*;
pub use log_event::*;
pub use log_sink::*;
pub use palette::*;
pub use preferences::*;
pub use progress::*;
pub use sales_rep::*;
pub use section::*;
pub use slash_commands::*;
pub use textarea::*;
