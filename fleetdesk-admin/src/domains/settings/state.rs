use fleetdesk_model::{Profile, Role, Vehicle};

use super::filter::{filter_profiles, filter_vehicles};
use super::forms::{FormError, NewUserForm, NewVehicleForm};

/// Tabs of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SettingsTab {
    #[default]
    Users,
    Vehicles,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 2] =
        [SettingsTab::Users, SettingsTab::Vehicles];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::Users => "User Management",
            SettingsTab::Vehicles => "Fleet Management",
        }
    }

    /// Plural noun used in the search placeholder.
    pub fn noun(&self) -> &'static str {
        match self {
            SettingsTab::Users => "users",
            SettingsTab::Vehicles => "vehicles",
        }
    }

    /// Singular noun used by the add button.
    pub fn entity(&self) -> &'static str {
        match self {
            SettingsTab::Users => "User",
            SettingsTab::Vehicles => "Vehicle",
        }
    }
}

/// Stamp carried by a fetch so its response can be matched to the newest
/// request of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: RequestToken,
}

impl RequestSequence {
    /// Issue a token that supersedes every earlier one.
    pub fn next(&mut self) -> RequestToken {
        self.latest = RequestToken(self.latest.0 + 1);
        self.latest
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == token
    }

    pub fn latest(&self) -> RequestToken {
        self.latest
    }
}

/// Who is looking at the screen. Supplied by the application's auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
}

impl Session {
    pub fn admin() -> Self {
        Self { role: Role::Admin }
    }

    pub fn user() -> Self {
        Self { role: Role::User }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Settings screen state
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub session: Session,
    pub active_tab: SettingsTab,
    pub profiles: Vec<Profile>,
    pub vehicles: Vec<Vehicle>,
    pub loading: bool,
    /// Banner text. One message at a time; the newest failure wins.
    pub error: Option<String>,
    pub search_query: String,

    // In-place row edits, independent of each other
    pub editing_profile: Option<Profile>,
    pub editing_vehicle: Option<Vehicle>,

    // Creation modals
    pub show_new_user_form: bool,
    pub show_new_vehicle_form: bool,
    pub new_user: NewUserForm,
    pub new_vehicle: NewVehicleForm,
    pub new_user_issue: Option<FormError>,
    pub new_vehicle_issue: Option<FormError>,

    pub profile_requests: RequestSequence,
    pub vehicle_requests: RequestSequence,
}

impl SettingsState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            active_tab: SettingsTab::default(),
            profiles: Vec::new(),
            vehicles: Vec::new(),
            loading: true,
            error: None,
            search_query: String::new(),
            editing_profile: None,
            editing_vehicle: None,
            show_new_user_form: false,
            show_new_vehicle_form: false,
            new_user: NewUserForm::default(),
            new_vehicle: NewVehicleForm::default(),
            new_user_issue: None,
            new_vehicle_issue: None,
            profile_requests: RequestSequence::default(),
            vehicle_requests: RequestSequence::default(),
        }
    }

    pub fn filtered_profiles(&self) -> Vec<&Profile> {
        filter_profiles(&self.profiles, &self.search_query)
    }

    pub fn filtered_vehicles(&self) -> Vec<&Vehicle> {
        filter_vehicles(&self.vehicles, &self.search_query)
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new(Session::admin())
    }
}
