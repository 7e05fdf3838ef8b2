pub use super::binder_cards::Entity as BinderCards;
pub use super::binders::Entity as Binders;
pub use super::card_design_colors::Entity as CardDesignColors;
pub use super::card_designs::Entity as CardDesigns;
pub use super::card_printings::Entity as CardPrintings;
pub use super::card_sets::Entity as CardSets;
pub use super::listings::Entity as Listings;
pub use super::users::Entity as Users;
