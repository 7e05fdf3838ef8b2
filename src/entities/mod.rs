pub mod prelude;

pub mod binder_cards;
pub mod binders;
pub mod card_design_colors;
pub mod card_designs;
pub mod card_printings;
pub mod card_sets;
pub mod listings;
pub mod users;
