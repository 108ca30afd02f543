use fleetdesk_model::{Profile, ProfileId, Role, Vehicle, VehicleId};

use crate::domains::settings::state::{RequestToken, SettingsTab};

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    // Lifecycle
    Mount,
    SelectTab(SettingsTab),
    SearchChanged(String),

    // Fetch results
    ProfilesLoaded {
        token: RequestToken,
        result: Result<Vec<Profile>, String>,
    },
    VehiclesLoaded {
        token: RequestToken,
        result: Result<Vec<Vehicle>, String>,
    },

    // User creation
    ShowNewUserForm,
    HideNewUserForm,
    NewUserEmail(String),
    NewUserFullName(String),
    NewUserBadgeNumber(String),
    NewUserRole(Role),
    NewUserPassword(String),
    SubmitNewUser,
    UserCreated(Result<ProfileId, String>),

    // Vehicle creation
    ShowNewVehicleForm,
    HideNewVehicleForm,
    NewVehicleUnitNumber(String),
    NewVehicleMake(String),
    NewVehicleModel(String),
    NewVehicleYear(String),
    SubmitNewVehicle,
    VehicleCreated(Result<(), String>),

    // Profile row edits
    EditProfile(ProfileId),
    EditProfileFullName(String),
    EditProfileBadgeNumber(String),
    EditProfileRole(Role),
    SaveProfile,
    CancelProfileEdit,
    ProfileSaved {
        id: ProfileId,
        result: Result<(), String>,
    },

    // Vehicle row edits
    EditVehicle(VehicleId),
    EditVehicleUnitNumber(String),
    EditVehicleMake(String),
    EditVehicleModel(String),
    EditVehicleYear(String),
    SaveVehicle,
    CancelVehicleEdit,
    VehicleSaved {
        id: VehicleId,
        result: Result<(), String>,
    },
}

impl Message {
    /// Returns a sanitized display string that hides sensitive credential data
    pub fn sanitized_display(&self) -> String {
        match self {
            Self::NewUserPassword(_) => "NewUserPassword(***)".to_string(),
            _ => format!("{:?}", self),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            // Lifecycle
            Self::Mount => "Settings::Mount",
            Self::SelectTab(_) => "Settings::SelectTab",
            Self::SearchChanged(_) => "Settings::SearchChanged",

            // Fetch results
            Self::ProfilesLoaded { .. } => "Settings::ProfilesLoaded",
            Self::VehiclesLoaded { .. } => "Settings::VehiclesLoaded",

            // User creation
            Self::ShowNewUserForm => "Settings::ShowNewUserForm",
            Self::HideNewUserForm => "Settings::HideNewUserForm",
            Self::NewUserEmail(_) => "Settings::NewUserEmail",
            Self::NewUserFullName(_) => "Settings::NewUserFullName",
            Self::NewUserBadgeNumber(_) => "Settings::NewUserBadgeNumber",
            Self::NewUserRole(_) => "Settings::NewUserRole",
            Self::NewUserPassword(_) => "Settings::NewUserPassword",
            Self::SubmitNewUser => "Settings::SubmitNewUser",
            Self::UserCreated(_) => "Settings::UserCreated",

            // Vehicle creation
            Self::ShowNewVehicleForm => "Settings::ShowNewVehicleForm",
            Self::HideNewVehicleForm => "Settings::HideNewVehicleForm",
            Self::NewVehicleUnitNumber(_) => "Settings::NewVehicleUnitNumber",
            Self::NewVehicleMake(_) => "Settings::NewVehicleMake",
            Self::NewVehicleModel(_) => "Settings::NewVehicleModel",
            Self::NewVehicleYear(_) => "Settings::NewVehicleYear",
            Self::SubmitNewVehicle => "Settings::SubmitNewVehicle",
            Self::VehicleCreated(_) => "Settings::VehicleCreated",

            // Profile row edits
            Self::EditProfile(_) => "Settings::EditProfile",
            Self::EditProfileFullName(_) => "Settings::EditProfileFullName",
            Self::EditProfileBadgeNumber(_) => {
                "Settings::EditProfileBadgeNumber"
            }
            Self::EditProfileRole(_) => "Settings::EditProfileRole",
            Self::SaveProfile => "Settings::SaveProfile",
            Self::CancelProfileEdit => "Settings::CancelProfileEdit",
            Self::ProfileSaved { .. } => "Settings::ProfileSaved",

            // Vehicle row edits
            Self::EditVehicle(_) => "Settings::EditVehicle",
            Self::EditVehicleUnitNumber(_) => "Settings::EditVehicleUnitNumber",
            Self::EditVehicleMake(_) => "Settings::EditVehicleMake",
            Self::EditVehicleModel(_) => "Settings::EditVehicleModel",
            Self::EditVehicleYear(_) => "Settings::EditVehicleYear",
            Self::SaveVehicle => "Settings::SaveVehicle",
            Self::CancelVehicleEdit => "Settings::CancelVehicleEdit",
            Self::VehicleSaved { .. } => "Settings::VehicleSaved",
        }
    }
}
