//! Settings domain
//!
//! The administrative settings screen: tabbed CRUD over user profiles and
//! vehicles. All state lives in [`SettingsState`]; [`update`] turns messages
//! into state changes and service requests, and [`view`] projects the state
//! into a [`view::Screen`].

pub mod filter;
pub mod forms;
pub mod messages;
pub mod provision;
pub mod state;
pub mod update;
pub mod view;

use std::sync::Arc;

use self::messages::Message as SettingsMessage;
use self::state::{Session, SettingsState};
use crate::common::messages::DomainUpdateResult;
use crate::infra::services::FleetDataService;

pub struct SettingsDomain {
    pub state: SettingsState,
    pub service: Arc<dyn FleetDataService>,
    /// Target of the confirmation link sent to newly registered users.
    pub redirect_to: String,
}

impl std::fmt::Debug for SettingsDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsDomain")
            .field("state", &self.state)
            .field("redirect_to", &self.redirect_to)
            .finish_non_exhaustive()
    }
}

impl SettingsDomain {
    pub fn new(
        session: Session,
        service: Arc<dyn FleetDataService>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            state: SettingsState::new(session),
            service,
            redirect_to: redirect_to.into(),
        }
    }

    pub fn update(&mut self, message: SettingsMessage) -> DomainUpdateResult {
        update::update_settings(self, message)
    }

    pub fn view(&self) -> view::Screen {
        view::view_settings(&self.state)
    }
}
