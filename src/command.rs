use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::orientation::{InvalidDirectionError, MoveDirection, TurnDirection};

#[derive(Debug, Error)]
pub enum CommandParseError {
	#[error("empty command")]
	Empty,
	#[error("unknown command: {0}")]
	Unknown(String),
	#[error("`{0}` needs a `direction` argument")]
	MissingDirection(&'static str),
	#[error("tool arguments must be a JSON object")]
	ArgumentsNotObject,
	#[error(transparent)]
	InvalidDirection(#[from] InvalidDirectionError),
	#[error("malformed tool call: {0}")]
	Json(#[from] serde_json::Error),
}

/// The closed set of commands a session accepts. Serialized as a tagged
/// object, e.g. `{"tool": "move", "direction": "forward"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Command {
	Move { direction: MoveDirection },
	Turn { direction: TurnDirection },
	TakePicture,
	GetStatus,
}

impl Command {
	pub fn name(&self) -> &'static str {
		match self {
			Command::Move { .. } => "move",
			Command::Turn { .. } => "turn",
			Command::TakePicture => "take_picture",
			Command::GetStatus => "get_status",
		}
	}

	/// Builds a command from a function-calling style tool invocation: the
	/// tool name plus its JSON arguments object.
	pub fn from_tool_call(name: &str, arguments: &Value) -> Result<Self, CommandParseError> {
		let args = match arguments {
			Value::Object(map) => Some(map),
			Value::Null => None,
			_ => return Err(CommandParseError::ArgumentsNotObject),
		};
		let direction = move |tool: &'static str| {
			args.and_then(|m| m.get("direction"))
				.and_then(Value::as_str)
				.ok_or(CommandParseError::MissingDirection(tool))
		};
		match name {
			"move" => Ok(Command::Move { direction: direction("move")?.parse()? }),
			"turn" => Ok(Command::Turn { direction: direction("turn")?.parse()? }),
			"take_picture" => Ok(Command::TakePicture),
			"get_status" => Ok(Command::GetStatus),
			other => Err(CommandParseError::Unknown(other.to_string())),
		}
	}

	pub fn from_json_str(s: &str) -> Result<Self, CommandParseError> {
		let value: Value = serde_json::from_str(s)?;
		let name = value
			.get("tool")
			.and_then(Value::as_str)
			.ok_or_else(|| CommandParseError::Unknown(value.to_string()))?;
		Self::from_tool_call(name, &value)
	}

	/// Parses one line of the interactive control loop: `forward`,
	/// `move left`, `turn right`, `photo`, `status`, ...
	pub fn parse_line(line: &str) -> Result<Self, CommandParseError> {
		let mut words = line.split_whitespace();
		let head = words.next().ok_or(CommandParseError::Empty)?.to_ascii_lowercase();
		let arg = words.next();
		match head.as_str() {
			"forward" | "backward" | "f" | "b" => {
				let d = if head.starts_with('f') { MoveDirection::Forward } else { MoveDirection::Backward };
				Ok(Command::Move { direction: d })
			}
			"move" | "m" => {
				let d = arg.ok_or(CommandParseError::MissingDirection("move"))?;
				Ok(Command::Move { direction: d.parse()? })
			}
			"turn" | "t" => {
				let d = arg.ok_or(CommandParseError::MissingDirection("turn"))?;
				Ok(Command::Turn { direction: d.parse()? })
			}
			"photo" | "picture" | "snap" | "take_picture" | "p" => Ok(Command::TakePicture),
			"status" | "get_status" | "s" => Ok(Command::GetStatus),
			_ => Err(CommandParseError::Unknown(line.trim().to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn tool_calls_map_to_commands() {
		let mv = Command::from_tool_call("move", &json!({ "direction": "left" })).unwrap();
		assert_eq!(mv, Command::Move { direction: MoveDirection::Left });
		let turn = Command::from_tool_call("turn", &json!({ "direction": "right" })).unwrap();
		assert_eq!(turn, Command::Turn { direction: TurnDirection::Right });
		assert_eq!(Command::from_tool_call("take_picture", &json!({})).unwrap(), Command::TakePicture);
		assert_eq!(Command::from_tool_call("get_status", &Value::Null).unwrap(), Command::GetStatus);
	}

	#[test]
	fn tool_call_errors() {
		assert!(matches!(
			Command::from_tool_call("move", &json!({ "direction": "up" })),
			Err(CommandParseError::InvalidDirection(_))
		));
		assert!(matches!(
			Command::from_tool_call("turn", &json!({ "direction": "backward" })),
			Err(CommandParseError::InvalidDirection(_))
		));
		assert!(matches!(
			Command::from_tool_call("move", &json!({})),
			Err(CommandParseError::MissingDirection("move"))
		));
		assert!(matches!(
			Command::from_tool_call("fly", &json!({})),
			Err(CommandParseError::Unknown(_))
		));
		assert!(matches!(
			Command::from_tool_call("move", &json!("forward")),
			Err(CommandParseError::ArgumentsNotObject)
		));
	}

	#[test]
	fn tagged_json_matches_tool_calls() {
		let c = Command::Turn { direction: TurnDirection::Left };
		let text = serde_json::to_string(&c).unwrap();
		assert_eq!(text, r#"{"tool":"turn","direction":"left"}"#);
		assert_eq!(Command::from_json_str(&text).unwrap(), c);
		assert_eq!(Command::from_json_str(r#"{"tool":"take_picture"}"#).unwrap(), Command::TakePicture);
	}

	#[test]
	fn parses_control_lines() {
		assert_eq!(Command::parse_line("forward").unwrap(), Command::Move { direction: MoveDirection::Forward });
		assert_eq!(Command::parse_line("b").unwrap(), Command::Move { direction: MoveDirection::Backward });
		assert_eq!(Command::parse_line("move Right").unwrap(), Command::Move { direction: MoveDirection::Right });
		assert_eq!(Command::parse_line("  turn left ").unwrap(), Command::Turn { direction: TurnDirection::Left });
		assert_eq!(Command::parse_line("photo").unwrap(), Command::TakePicture);
		assert_eq!(Command::parse_line("status").unwrap(), Command::GetStatus);
		assert!(matches!(Command::parse_line("   "), Err(CommandParseError::Empty)));
		assert!(matches!(Command::parse_line("turn"), Err(CommandParseError::MissingDirection("turn"))));
		assert!(matches!(Command::parse_line("dance"), Err(CommandParseError::Unknown(_))));
	}
}
