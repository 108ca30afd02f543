//! Projection of [`SettingsState`] into a framework-neutral screen tree.
//!
//! Interactive nodes carry the [`Message`] they dispatch (buttons) or the
//! [`Field`] they write to (inputs), so a front end only has to draw the tree
//! and hand interactions back to the domain.

use std::fmt;

use fleetdesk_model::{Profile, Role, Vehicle, year_bounds};

use super::forms::current_year;
use super::messages::Message;
use super::state::{SettingsState, SettingsTab};
use crate::common::messages::Route;

pub const PROFILE_HEADERS: [&str; 5] =
    ["Name", "Email", "Badge Number", "Role", "Actions"];
pub const VEHICLE_HEADERS: [&str; 5] =
    ["Unit Number", "Make", "Model", "Year", "Actions"];

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// The viewer may not see this screen.
    Redirect(Route),
    /// A fetch is in flight; only a spinner is shown.
    Loading,
    Settings(SettingsView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub title: &'static str,
    pub banner: Option<String>,
    pub tabs: Vec<TabButton>,
    pub search: TextInput,
    pub add_button: Button,
    pub table: Table,
    /// Open creation modals, user modal first.
    pub modals: Vec<Modal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabButton {
    pub label: &'static str,
    pub icon: Icon,
    pub active: bool,
    pub on_press: Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Users,
    Car,
    Plus,
    Edit,
    Save,
    Cancel,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub icon: Option<Icon>,
    pub on_press: Message,
}

impl Button {
    fn new(
        label: impl Into<String>,
        icon: Option<Icon>,
        on_press: Message,
    ) -> Self {
        Self {
            label: label.into(),
            icon,
            on_press,
        }
    }

    fn icon(icon: Icon, on_press: Message) -> Self {
        Self::new("", Some(icon), on_press)
    }
}

/// Which buffer an input writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Search,
    NewUserEmail,
    NewUserFullName,
    NewUserBadgeNumber,
    NewUserPassword,
    NewVehicleUnitNumber,
    NewVehicleMake,
    NewVehicleModel,
    NewVehicleYear,
    EditProfileFullName,
    EditProfileBadgeNumber,
    EditVehicleUnitNumber,
    EditVehicleMake,
    EditVehicleModel,
    EditVehicleYear,
}

impl Field {
    pub fn message(self, value: String) -> Message {
        match self {
            Field::Search => Message::SearchChanged(value),
            Field::NewUserEmail => Message::NewUserEmail(value),
            Field::NewUserFullName => Message::NewUserFullName(value),
            Field::NewUserBadgeNumber => Message::NewUserBadgeNumber(value),
            Field::NewUserPassword => Message::NewUserPassword(value),
            Field::NewVehicleUnitNumber => Message::NewVehicleUnitNumber(value),
            Field::NewVehicleMake => Message::NewVehicleMake(value),
            Field::NewVehicleModel => Message::NewVehicleModel(value),
            Field::NewVehicleYear => Message::NewVehicleYear(value),
            Field::EditProfileFullName => Message::EditProfileFullName(value),
            Field::EditProfileBadgeNumber => {
                Message::EditProfileBadgeNumber(value)
            }
            Field::EditVehicleUnitNumber => {
                Message::EditVehicleUnitNumber(value)
            }
            Field::EditVehicleMake => Message::EditVehicleMake(value),
            Field::EditVehicleModel => Message::EditVehicleModel(value),
            Field::EditVehicleYear => Message::EditVehicleYear(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number { min: Option<i32>, max: Option<i32> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub placeholder: String,
    pub kind: InputKind,
    pub required: bool,
    pub field: Field,
}

impl TextInput {
    fn new(field: Field, value: impl Into<String>, kind: InputKind) -> Self {
        Self {
            value: value.into(),
            placeholder: String::new(),
            kind,
            required: false,
            field,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn on_input(&self, value: impl Into<String>) -> Message {
        self.field.message(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTarget {
    NewUser,
    EditingProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleSelect {
    pub selected: Role,
    pub options: [Role; 2],
    pub target: RoleTarget,
}

impl RoleSelect {
    fn new(selected: Role, target: RoleTarget) -> Self {
        Self {
            selected,
            options: Role::ALL,
            target,
        }
    }

    pub fn on_select(&self, role: Role) -> Message {
        match self.target {
            RoleTarget::NewUser => Message::NewUserRole(role),
            RoleTarget::EditingProfile => Message::EditProfileRole(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Input(TextInput),
    RoleSelect(RoleSelect),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Muted(String),
    /// Role pill; admins are highlighted.
    RoleBadge(Role),
    Control(Control),
    Actions(Vec<Button>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    pub editing: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub title: &'static str,
    pub fields: Vec<FormField>,
    /// First form constraint the last submit attempt violated.
    pub issue: Option<String>,
    pub close: Button,
    pub cancel: Button,
    pub submit: Button,
}

/// Project the settings state into a screen.
pub fn view_settings(state: &SettingsState) -> Screen {
    if !state.session.is_admin() {
        return Screen::Redirect(Route::Dashboard);
    }
    if state.loading {
        return Screen::Loading;
    }

    let tab = state.active_tab;
    let tabs = SettingsTab::ALL
        .into_iter()
        .map(|candidate| TabButton {
            label: candidate.label(),
            icon: match candidate {
                SettingsTab::Users => Icon::Users,
                SettingsTab::Vehicles => Icon::Car,
            },
            active: candidate == tab,
            on_press: Message::SelectTab(candidate),
        })
        .collect();

    let mut search = TextInput::new(
        Field::Search,
        state.search_query.clone(),
        InputKind::Text,
    );
    search.placeholder = format!("Search {}...", tab.noun());

    let add_button = Button::new(
        format!("Add {}", tab.entity()),
        Some(Icon::Plus),
        match tab {
            SettingsTab::Users => Message::ShowNewUserForm,
            SettingsTab::Vehicles => Message::ShowNewVehicleForm,
        },
    );

    let table = match tab {
        SettingsTab::Users => profile_table(state),
        SettingsTab::Vehicles => vehicle_table(state),
    };

    let mut modals = Vec::new();
    if state.show_new_user_form {
        modals.push(new_user_modal(state));
    }
    if state.show_new_vehicle_form {
        modals.push(new_vehicle_modal(state));
    }

    Screen::Settings(SettingsView {
        title: "Settings",
        banner: state.error.clone(),
        tabs,
        search,
        add_button,
        table,
        modals,
    })
}

fn profile_table(state: &SettingsState) -> Table {
    let rows = state
        .filtered_profiles()
        .into_iter()
        .map(|profile| {
            match state
                .editing_profile
                .as_ref()
                .filter(|editing| editing.id == profile.id)
            {
                Some(editing) => editing_profile_row(profile, editing),
                None => profile_row(profile),
            }
        })
        .collect();

    Table {
        headers: PROFILE_HEADERS.to_vec(),
        rows,
    }
}

fn profile_row(profile: &Profile) -> Row {
    Row {
        key: profile.id.to_string(),
        editing: false,
        cells: vec![
            Cell::Text(profile.full_name.clone()),
            Cell::Muted(profile.email.clone()),
            Cell::Muted(
                profile
                    .badge_number
                    .clone()
                    .filter(|badge| !badge.is_empty())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::RoleBadge(profile.role),
            Cell::Actions(vec![Button::icon(
                Icon::Edit,
                Message::EditProfile(profile.id.clone()),
            )]),
        ],
    }
}

/// The listed email stays read-only while the other fields are edited.
fn editing_profile_row(listed: &Profile, editing: &Profile) -> Row {
    Row {
        key: listed.id.to_string(),
        editing: true,
        cells: vec![
            Cell::Control(Control::Input(TextInput::new(
                Field::EditProfileFullName,
                editing.full_name.clone(),
                InputKind::Text,
            ))),
            Cell::Muted(listed.email.clone()),
            Cell::Control(Control::Input(TextInput::new(
                Field::EditProfileBadgeNumber,
                editing.badge_number.clone().unwrap_or_default(),
                InputKind::Text,
            ))),
            Cell::Control(Control::RoleSelect(RoleSelect::new(
                editing.role,
                RoleTarget::EditingProfile,
            ))),
            Cell::Actions(vec![
                Button::icon(Icon::Save, Message::SaveProfile),
                Button::icon(Icon::Cancel, Message::CancelProfileEdit),
            ]),
        ],
    }
}

fn vehicle_table(state: &SettingsState) -> Table {
    let rows = state
        .filtered_vehicles()
        .into_iter()
        .map(|vehicle| {
            match state
                .editing_vehicle
                .as_ref()
                .filter(|editing| editing.id == vehicle.id)
            {
                Some(editing) => editing_vehicle_row(editing),
                None => vehicle_row(vehicle),
            }
        })
        .collect();

    Table {
        headers: VEHICLE_HEADERS.to_vec(),
        rows,
    }
}

fn vehicle_row(vehicle: &Vehicle) -> Row {
    Row {
        key: vehicle.id.to_string(),
        editing: false,
        cells: vec![
            Cell::Text(vehicle.unit_number.clone()),
            Cell::Muted(vehicle.make.clone()),
            Cell::Muted(vehicle.model.clone()),
            Cell::Muted(vehicle.year.to_string()),
            Cell::Actions(vec![Button::icon(
                Icon::Edit,
                Message::EditVehicle(vehicle.id.clone()),
            )]),
        ],
    }
}

fn editing_vehicle_row(editing: &Vehicle) -> Row {
    let text = |field, value: &str| {
        Cell::Control(Control::Input(TextInput::new(
            field,
            value,
            InputKind::Text,
        )))
    };
    Row {
        key: editing.id.to_string(),
        editing: true,
        cells: vec![
            text(Field::EditVehicleUnitNumber, &editing.unit_number),
            text(Field::EditVehicleMake, &editing.make),
            text(Field::EditVehicleModel, &editing.model),
            Cell::Control(Control::Input(TextInput::new(
                Field::EditVehicleYear,
                editing.year.to_string(),
                InputKind::Number {
                    min: None,
                    max: None,
                },
            ))),
            Cell::Actions(vec![
                Button::icon(Icon::Save, Message::SaveVehicle),
                Button::icon(Icon::Cancel, Message::CancelVehicleEdit),
            ]),
        ],
    }
}

fn new_user_modal(state: &SettingsState) -> Modal {
    let form = &state.new_user;
    let input = |label, field, value: &str, kind| FormField {
        label,
        control: Control::Input(TextInput::new(field, value, kind)),
    };

    let mut fields = vec![
        input("Email", Field::NewUserEmail, &form.email, InputKind::Email),
        input(
            "Full Name",
            Field::NewUserFullName,
            &form.full_name,
            InputKind::Text,
        ),
        input(
            "Badge Number",
            Field::NewUserBadgeNumber,
            &form.badge_number,
            InputKind::Text,
        ),
        FormField {
            label: "Role",
            control: Control::RoleSelect(RoleSelect::new(
                form.role,
                RoleTarget::NewUser,
            )),
        },
        input(
            "Password",
            Field::NewUserPassword,
            &form.password,
            InputKind::Password,
        ),
    ];
    for field in &mut fields {
        if let Control::Input(input) = &mut field.control
            && input.field != Field::NewUserBadgeNumber
        {
            input.required = true;
        }
    }

    Modal {
        title: "Add New User",
        fields,
        issue: state.new_user_issue.as_ref().map(ToString::to_string),
        close: Button::icon(Icon::Close, Message::HideNewUserForm),
        cancel: Button::new("Cancel", None, Message::HideNewUserForm),
        submit: Button::new("Create User", None, Message::SubmitNewUser),
    }
}

fn new_vehicle_modal(state: &SettingsState) -> Modal {
    let form = &state.new_vehicle;
    let bounds = year_bounds(current_year());
    let text = |label, field, value: &str| FormField {
        label,
        control: Control::Input(
            TextInput::new(field, value, InputKind::Text).required(),
        ),
    };

    Modal {
        title: "Add New Vehicle",
        fields: vec![
            text("Unit Number", Field::NewVehicleUnitNumber, &form.unit_number),
            text("Make", Field::NewVehicleMake, &form.make),
            text("Model", Field::NewVehicleModel, &form.model),
            FormField {
                label: "Year",
                control: Control::Input(
                    TextInput::new(
                        Field::NewVehicleYear,
                        form.year.map(|y| y.to_string()).unwrap_or_default(),
                        InputKind::Number {
                            min: Some(*bounds.start()),
                            max: Some(*bounds.end()),
                        },
                    )
                    .required(),
                ),
            },
        ],
        issue: state.new_vehicle_issue.as_ref().map(ToString::to_string),
        close: Button::icon(Icon::Close, Message::HideNewVehicleForm),
        cancel: Button::new("Cancel", None, Message::HideNewVehicleForm),
        submit: Button::new("Create Vehicle", None, Message::SubmitNewVehicle),
    }
}

// Plain-text rendering, used by the console binary.

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Redirect(route) => write!(f, "-> {}", route.path()),
            Screen::Loading => f.write_str("Loading..."),
            Screen::Settings(view) => write!(f, "{view}"),
        }
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(banner) = &self.banner {
            writeln!(f, "[!] {banner}")?;
        }
        let tabs: Vec<String> = self
            .tabs
            .iter()
            .map(|tab| {
                if tab.active {
                    format!("[{}]", tab.label)
                } else {
                    tab.label.to_string()
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join("  "))?;
        writeln!(
            f,
            "{}: {}    (+ {})",
            self.search.placeholder, self.search.value, self.add_button.label
        )?;
        write!(f, "{}", self.table)?;
        for modal in &self.modals {
            write!(f, "{modal}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headers.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<String> =
                row.cells.iter().map(Cell::to_string).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) | Cell::Muted(text) => f.write_str(text),
            Cell::RoleBadge(role) => write!(f, "({role})"),
            Cell::Control(control) => write!(f, "{control}"),
            Cell::Actions(buttons) => {
                let labels: Vec<String> =
                    buttons.iter().map(Button::to_string).collect();
                f.write_str(&labels.join(" "))
            }
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Input(input) if input.kind == InputKind::Password => {
                write!(f, "<{}>", "*".repeat(input.value.chars().count()))
            }
            Control::Input(input) => write!(f, "<{}>", input.value),
            Control::RoleSelect(select) => {
                write!(f, "<{} v>", select.selected.label())
            }
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.icon, self.label.is_empty()) {
            (Some(icon), true) => write!(f, "[{icon:?}]"),
            _ => write!(f, "[{}]", self.label),
        }
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for field in &self.fields {
            writeln!(f, "{}: {}", field.label, field.control)?;
        }
        if let Some(issue) = &self.issue {
            writeln!(f, "! {issue}")?;
        }
        writeln!(f, "{} {}", self.cancel, self.submit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::settings::state::Session;
    use fleetdesk_model::{ProfileId, VehicleId, VehicleStatus};

    fn loaded_state() -> SettingsState {
        let mut state = SettingsState::new(Session::admin());
        state.loading = false;
        state.profiles = vec![
            Profile {
                id: ProfileId::new("1"),
                role: Role::User,
                full_name: "Bea".into(),
                badge_number: None,
                email: "b@x.com".into(),
            },
            Profile {
                id: ProfileId::new("2"),
                role: Role::Admin,
                full_name: "Cy".into(),
                badge_number: Some("77".into()),
                email: "c@x.com".into(),
            },
        ];
        state.vehicles = vec![Vehicle {
            id: VehicleId::new("v1"),
            unit_number: "U1".into(),
            make: "Ford".into(),
            model: "F150".into(),
            year: 2023,
            status: VehicleStatus::Available,
        }];
        state
    }

    fn settings(screen: Screen) -> SettingsView {
        match screen {
            Screen::Settings(view) => view,
            other => panic!("expected settings view, got {other:?}"),
        }
    }

    #[test]
    fn non_admins_are_redirected() {
        let state = SettingsState::new(Session::user());
        assert_eq!(view_settings(&state), Screen::Redirect(Route::Dashboard));
    }

    #[test]
    fn loading_shows_only_spinner() {
        let mut state = loaded_state();
        state.loading = true;
        state.error = Some("Failed to fetch profiles".into());
        assert_eq!(view_settings(&state), Screen::Loading);
    }

    #[test]
    fn users_tab_projects_rows_and_chrome() {
        let view = settings(view_settings(&loaded_state()));
        assert_eq!(view.search.placeholder, "Search users...");
        assert_eq!(view.add_button.label, "Add User");
        assert_eq!(view.add_button.on_press, Message::ShowNewUserForm);
        assert!(view.tabs[0].active && !view.tabs[1].active);
        assert_eq!(view.table.headers, PROFILE_HEADERS.to_vec());
        assert_eq!(view.table.rows.len(), 2);
        assert_eq!(view.table.rows[0].cells[2], Cell::Muted("-".into()));
        assert_eq!(view.table.rows[1].cells[3], Cell::RoleBadge(Role::Admin));
        assert_eq!(
            view.table.rows[0].cells[4],
            Cell::Actions(vec![Button::icon(
                Icon::Edit,
                Message::EditProfile(ProfileId::new("1"))
            )])
        );
    }

    #[test]
    fn search_filters_rows() {
        let mut state = loaded_state();
        state.search_query = "BEA".into();
        let view = settings(view_settings(&state));
        assert_eq!(view.table.rows.len(), 1);
        assert_eq!(
            view.search.on_input("cy"),
            Message::SearchChanged("cy".into())
        );
    }

    #[test]
    fn editing_row_renders_inputs_with_buffer_values() {
        let mut state = loaded_state();
        let mut editing = state.profiles[1].clone();
        editing.full_name = "Cyrus".into();
        state.editing_profile = Some(editing);

        let view = settings(view_settings(&state));
        let row = &view.table.rows[1];
        assert!(row.editing);
        match &row.cells[0] {
            Cell::Control(Control::Input(input)) => {
                assert_eq!(input.value, "Cyrus");
                assert_eq!(
                    input.on_input("Cy R"),
                    Message::EditProfileFullName("Cy R".into())
                );
            }
            other => panic!("expected input, got {other:?}"),
        }
        assert_eq!(row.cells[1], Cell::Muted("c@x.com".into()));
        match &row.cells[3] {
            Cell::Control(Control::RoleSelect(select)) => {
                assert_eq!(
                    select.on_select(Role::User),
                    Message::EditProfileRole(Role::User)
                );
            }
            other => panic!("expected role select, got {other:?}"),
        }
        assert!(!view.table.rows[0].editing);
    }

    #[test]
    fn vehicles_tab_and_modal() {
        let mut state = loaded_state();
        state.active_tab = SettingsTab::Vehicles;
        state.show_new_vehicle_form = true;
        state.new_vehicle.year = None;

        let view = settings(view_settings(&state));
        assert_eq!(view.search.placeholder, "Search vehicles...");
        assert_eq!(view.add_button.label, "Add Vehicle");
        assert_eq!(view.table.rows[0].cells[3], Cell::Muted("2023".into()));
        assert_eq!(view.modals.len(), 1);

        let modal = &view.modals[0];
        assert_eq!(modal.submit.on_press, Message::SubmitNewVehicle);
        let Control::Input(year) = &modal.fields[3].control else {
            panic!("year should be an input");
        };
        assert!(year.required);
        assert_eq!(year.value, "");
        assert_eq!(
            year.kind,
            InputKind::Number {
                min: Some(1900),
                max: Some(current_year() + 1)
            }
        );
    }

    #[test]
    fn user_modal_marks_badge_optional_and_masks_password() {
        let mut state = loaded_state();
        state.show_new_user_form = true;
        state.new_user.password = "hunter22".into();

        let view = settings(view_settings(&state));
        let modal = &view.modals[0];
        let required: Vec<(&str, bool)> = modal
            .fields
            .iter()
            .filter_map(|field| match &field.control {
                Control::Input(input) => Some((field.label, input.required)),
                Control::RoleSelect(_) => None,
            })
            .collect();
        assert_eq!(
            required,
            vec![
                ("Email", true),
                ("Full Name", true),
                ("Badge Number", false),
                ("Password", true)
            ]
        );

        let rendered = Screen::Settings(view).to_string();
        assert!(rendered.contains("== Add New User =="));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn banner_is_rendered() {
        let mut state = loaded_state();
        state.error = Some("Failed to update profile".into());
        let rendered = view_settings(&state).to_string();
        assert!(rendered.contains("[!] Failed to update profile"));
        assert!(rendered.contains("[User Management]  Fleet Management"));
        assert!(rendered.contains("Bea | b@x.com | - | (user) | [Edit]"));
    }
}
