pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserInfo};
pub use auth_service_impl::SeaOrmAuthService;

pub mod binder_service;
pub mod binder_service_impl;
pub use binder_service::{BinderError, BinderService};
pub use binder_service_impl::SeaOrmBinderService;

pub mod listing_service;
pub mod listing_service_impl;
pub use listing_service::{ListingError, ListingService};
pub use listing_service_impl::SeaOrmListingService;

pub mod search_service;
pub mod search_service_impl;
pub use search_service::{CardSearchService, SearchError};
pub use search_service_impl::SeaOrmCardSearchService;
