use crate::auth::RoleLevel;

/// Top-level views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Live,
    Recordings,
    ClothingSearch,
    Configuration,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Live,
        Tab::Recordings,
        Tab::ClothingSearch,
        Tab::Configuration,
        Tab::Users,
    ];

    pub fn required_role(&self) -> RoleLevel {
        match self {
            Tab::Live => RoleLevel::VIEWER,
            Tab::Recordings | Tab::ClothingSearch => RoleLevel::OPERATOR,
            Tab::Configuration | Tab::Users => RoleLevel::ADMIN,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Live => "Live",
            Tab::Recordings => "Recordings",
            Tab::ClothingSearch => "Clothing search",
            Tab::Configuration => "Configuration",
            Tab::Users => "Users",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
