#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use socialift_domain::User;

pub mod log;
pub mod navigation;
pub mod page;
pub mod service;
pub mod settings;


pub use navigation::{Navigator, Route};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};

/// Everything a page needs besides its own state: the service giving access to the stores, the
/// authenticated user and the navigation.
pub struct Context<S, N> {
    pub service: S,
    pub user: User,
    pub navigator: N,
}

impl<S, N> Context<S, N> {
    pub fn new(service: S, user: User, navigator: N) -> Self {
        Self {
            service,
            user,
            navigator,
        }
    }
}
