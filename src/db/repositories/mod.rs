pub mod binder;
pub mod card;
pub mod listing;
pub mod search;
pub mod user;
