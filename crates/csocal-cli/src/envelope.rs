use std::fmt::{Display, Formatter};

use csocal_core::UtcInstant;
use serde::Serialize;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Request identifier (UUID v4) for correlating output with logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Standard response envelope for all `csocal` machine-readable output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// Metadata attached to every envelope. `as_of` is the instant the command
/// was evaluated at; `generated_at` is wall-clock time of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: RequestId,
    pub schema_version: String,
    pub generated_at: UtcInstant,
    pub as_of: UtcInstant,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(as_of: UtcInstant) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: UtcInstant::now(),
            as_of,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
