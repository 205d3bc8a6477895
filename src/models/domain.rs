//! Discovered domain records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Discovery source that reported a hostname.
///
/// `Manual` marks hosts supplied directly on the command line; it is not a
/// discovery provider and is rejected in provider configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    K8s,
    Tf,
    Aws,
    Azure,
    Gcp,
    Manual,
}

impl Provider {
    /// All discovery providers, in default run order.
    pub const DISCOVERY: [Provider; 5] = [
        Provider::K8s,
        Provider::Tf,
        Provider::Aws,
        Provider::Azure,
        Provider::Gcp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::K8s => "k8s",
            Provider::Tf => "tf",
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::Manual => "manual",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "k8s" => Ok(Provider::K8s),
            "tf" => Ok(Provider::Tf),
            "aws" => Ok(Provider::Aws),
            "azure" => Ok(Provider::Azure),
            "gcp" => Ok(Provider::Gcp),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// A TLS-terminating hostname reported by a discovery source.
///
/// The hostname is the identity used for deduplication; provenance fields
/// (namespace, resource name, ...) are supplementary and never take part
/// in equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub hostname: String,
    pub source: Provider,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<String, String>,
}

impl Domain {
    pub fn new(hostname: impl Into<String>, source: Provider) -> Self {
        Self {
            hostname: hostname.into(),
            source,
            provenance: BTreeMap::new(),
        }
    }
}
