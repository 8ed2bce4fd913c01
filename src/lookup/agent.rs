//! Best-effort User-Agent parsing.
//!
//! # Responsibilities
//! - Turn the free-form User-Agent header into browser/OS/device facts
//!
//! # Design Decisions
//! - Parsing never fails: an absent or unrecognizable header yields the
//!   parser's `UNKNOWN` sentinel in every field
//! - The woothee dataset is built once at startup and shared read-only

use serde::Serialize;
use woothee::parser::Parser;

/// Sentinel for fields the parser could not determine (woothee's own).
pub const UNKNOWN: &str = "UNKNOWN";

/// Parsed browser/OS/device facts, always fully populated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub browser: String,
    pub version: String,
    pub os: String,
    pub os_version: String,
    pub device: String,
}

impl AgentInfo {
    fn unknown() -> Self {
        Self {
            browser: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
            os_version: UNKNOWN.to_string(),
            device: UNKNOWN.to_string(),
        }
    }
}

/// User-Agent parser wrapping the woothee dataset.
pub struct UserAgentParser {
    parser: Parser,
}

impl Default for UserAgentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAgentParser {
    pub fn new() -> Self {
        Self { parser: Parser::new() }
    }

    /// Parse a User-Agent header value. `None` or an unparseable string
    /// resolves to all-`UNKNOWN`, never an error.
    pub fn parse(&self, user_agent: Option<&str>) -> AgentInfo {
        let Some(user_agent) = user_agent else {
            return AgentInfo::unknown();
        };
        match self.parser.parse(user_agent) {
            Some(result) => AgentInfo {
                browser: result.name.to_string(),
                version: result.version.to_string(),
                os: result.os.to_string(),
                os_version: result.os_version.to_string(),
                device: result.category.to_string(),
            },
            None => AgentInfo::unknown(),
        }
    }
}
