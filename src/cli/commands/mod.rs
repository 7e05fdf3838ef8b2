mod card;
mod search;
mod sets;

pub use card::cmd_card;
pub use search::cmd_search;
pub use sets::cmd_sets;
