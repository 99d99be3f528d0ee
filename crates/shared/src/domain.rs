use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(ElementId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Image,
    Label,
}

/// Screen inferred from the file stem of the image shown on the primary display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenContext {
    Welcome,
    Registration,
    Language,
    Hello,
    Unknown,
}

impl ScreenContext {
    /// `default_images/welcome.png` -> `Welcome`. Directories and everything from the
    /// first `.` of the file name onwards are ignored.
    pub fn from_image_path(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let stem = file_name.split('.').next().unwrap_or(file_name);
        match stem {
            "welcome" => Self::Welcome,
            "registration" => Self::Registration,
            "language" => Self::Language,
            "hello" => Self::Hello,
            _ => Self::Unknown,
        }
    }

    /// Prompt timers that must be running while this screen is shown.
    pub fn required_prompts(self) -> &'static [PromptCategory] {
        match self {
            Self::Welcome => &[PromptCategory::Welcoming],
            Self::Registration => &[PromptCategory::UnknownUser, PromptCategory::Vocal],
            Self::Language => &[PromptCategory::Language],
            Self::Hello | Self::Unknown => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptCategory {
    Welcoming,
    UnknownUser,
    Language,
    Vocal,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 4] = [
        PromptCategory::Welcoming,
        PromptCategory::UnknownUser,
        PromptCategory::Language,
        PromptCategory::Vocal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Welcoming => "welcoming",
            Self::UnknownUser => "unknown_user",
            Self::Language => "language",
            Self::Vocal => "vocal",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "OK",
            Self::Disconnected => "NOT CONNECTED",
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
