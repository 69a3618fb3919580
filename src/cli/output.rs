use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::config::RobotConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Something that renders itself for either audience.
pub trait Formattable {
    fn format(&self, fmt: OutputFormat) -> String;
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Some(Utc::now()),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        data,
        warnings: Vec::new(),
    }
}

impl<T> RobotResponse<T> {
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Drop `timestamp` and `version` from the envelope.
    #[must_use]
    pub fn without_metadata(mut self) -> Self {
        self.timestamp = None;
        self.version = None;
        self
    }
}

/// Print a robot response shaped by the `[robot]` config section.
pub fn emit_robot<T: Serialize>(response: RobotResponse<T>, config: &RobotConfig) -> Result<()> {
    println!("{}", render_robot(response, config)?);
    Ok(())
}

pub fn render_robot<T: Serialize>(response: RobotResponse<T>, config: &RobotConfig) -> Result<String> {
    let response = if config.include_metadata {
        response
    } else {
        response.without_metadata()
    };
    if config.is_compact() {
        Ok(serde_json::to_string(&response)?)
    } else {
        to_json(&response)
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 12,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.chars().count().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        self.lines
            .push(format!("{:width$} {value}", style(key).dim(), width = self.key_width));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}
