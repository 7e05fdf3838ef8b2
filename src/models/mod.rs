pub mod binder;
pub mod card;
pub mod listing;
