use serde::{Deserialize, Serialize};

use crate::{
    domain::{ControlKind, ElementId},
    error::CommandError,
};

pub const FIELD_SEPARATOR: char = '_';
pub const BUTTON_SEPARATOR: char = '$';
/// Button values starting with this marker are image sources rather than labels.
pub const IMAGE_MARKER: &str = "img";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub id: ElementId,
    pub kind: ControlKind,
    pub value: String,
}

impl ButtonSpec {
    /// Parses `<id>$<labelOrImagePath>`. Segments after a second `$` are dropped.
    pub fn parse(payload: &str) -> Result<Self, CommandError> {
        let mut parts = payload.split(BUTTON_SEPARATOR);
        let id = parts.next().unwrap_or_default();
        let Some(value) = parts.next() else {
            return Err(CommandError::MalformedButton(payload.to_string()));
        };
        if id.is_empty() {
            return Err(CommandError::MalformedButton(payload.to_string()));
        }

        let kind = if value.starts_with(IMAGE_MARKER) {
            ControlKind::Image
        } else {
            ControlKind::Label
        };

        Ok(Self {
            id: ElementId::from(id),
            kind,
            value: value.to_string(),
        })
    }
}

/// A decoded inbound instruction from the robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Command {
    DisplayText { region: String, text: String },
    DisplayImage { region: String, path: String },
    DisplayButton(ButtonSpec),
    RemoveButtons,
    Navigate { url: String },
}

impl Command {
    /// Decodes a raw `_`-separated message. Pure: nothing is touched until dispatch.
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let tokens: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        let verb = tokens[0];

        match verb {
            "display" => {
                require(&tokens, 2)?;
                match tokens[1] {
                    "text" => {
                        require(&tokens, 4)?;
                        Ok(Self::DisplayText {
                            region: tokens[2].to_string(),
                            text: tokens[3].to_string(),
                        })
                    }
                    "image" => {
                        require(&tokens, 4)?;
                        Ok(Self::DisplayImage {
                            region: tokens[2].to_string(),
                            path: rejoin(&tokens[3..]),
                        })
                    }
                    "button" => {
                        require(&tokens, 3)?;
                        ButtonSpec::parse(&rejoin(&tokens[2..])).map(Self::DisplayButton)
                    }
                    other => Err(CommandError::UnknownSubtype {
                        verb: verb.to_string(),
                        subtype: other.to_string(),
                    }),
                }
            }
            "remove" => {
                require(&tokens, 2)?;
                match tokens[1] {
                    "buttons" => Ok(Self::RemoveButtons),
                    other => Err(CommandError::UnknownSubtype {
                        verb: verb.to_string(),
                        subtype: other.to_string(),
                    }),
                }
            }
            "url" => {
                require(&tokens, 2)?;
                Ok(Self::Navigate {
                    url: rejoin(&tokens[1..]),
                })
            }
            other => Err(CommandError::UnknownVerb(other.to_string())),
        }
    }

    /// Node addressed by a display command, e.g. `text_default` or `image_default`.
    pub fn node_id(&self) -> Option<String> {
        match self {
            Self::DisplayText { region, .. } => Some(format!("text{FIELD_SEPARATOR}{region}")),
            Self::DisplayImage { region, .. } => Some(format!("image{FIELD_SEPARATOR}{region}")),
            _ => None,
        }
    }
}

fn require(tokens: &[&str], expected: usize) -> Result<(), CommandError> {
    if tokens.len() < expected {
        return Err(CommandError::Malformed {
            verb: tokens[..tokens.len().min(2)].join(" "),
            expected,
            actual: tokens.len(),
        });
    }
    Ok(())
}

fn rejoin(tokens: &[&str]) -> String {
    tokens.join(FIELD_SEPARATOR.to_string().as_str())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
