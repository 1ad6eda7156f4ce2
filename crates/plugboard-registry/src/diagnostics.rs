//! Serializable registry summaries
//!
//! A point-in-time answer to "what do I have": families, producers, default
//! designations and child profiles, sorted for stable output. Summaries
//! serialize for tooling and render as text for humans.

use crate::node::RegistryNode;
use serde::Serialize;
use std::fmt;

/// One producer inside a family summary
#[derive(Debug, Clone, Serialize)]
pub struct InstanceSummary {
    /// Instance name, unique within the family
    pub name: String,
    /// Lifetime scope
    pub scope: String,
    /// Producer self-description
    pub description: String,
    /// Whether this producer is the family default
    pub is_default: bool,
}

/// One plugin family inside a registry summary
#[derive(Debug, Clone, Serialize)]
pub struct FamilySummary {
    /// Plugin type descriptor, rendered
    pub descriptor: String,
    /// Name of the default producer, if one resolves
    pub default: Option<String>,
    /// Producers in registration order
    pub instances: Vec<InstanceSummary>,
}

/// Snapshot of one registry node's configuration
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySummary {
    /// Profile name of the node
    pub profile: String,
    /// Families sorted by rendered descriptor
    pub families: Vec<FamilySummary>,
    /// Names of named profile children
    pub profiles: Vec<String>,
    /// Fallback policies in consultation order
    pub policies: Vec<String>,
    /// Number of cached singleton values
    pub cached_values: usize,
}

impl RegistrySummary {
    pub(crate) fn from_node(node: &RegistryNode) -> Self {
        let mut families: Vec<FamilySummary> = node
            .families()
            .families_snapshot()
            .iter()
            .map(|family| {
                let default = family.default_name();
                let instances = family
                    .instances()
                    .iter()
                    .map(|instance| InstanceSummary {
                        name: instance.name().to_string(),
                        scope: instance.scope().to_string(),
                        description: instance.description(),
                        is_default: default.as_deref() == Some(instance.name()),
                    })
                    .collect();
                FamilySummary {
                    descriptor: family.descriptor().to_string(),
                    default,
                    instances,
                }
            })
            .collect();
        families.sort_by(|a, b| a.descriptor.cmp(&b.descriptor));

        Self {
            profile: node.profile_name().to_string(),
            families,
            profiles: node.profile_names(),
            policies: node.families().policy_chain().policy_names(),
            cached_values: node.lifecycle().len(),
        }
    }
}

impl fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registry profile '{}'", self.profile)?;
        if !self.policies.is_empty() {
            writeln!(f, "  policies: {}", self.policies.join(", "))?;
        }
        for family in &self.families {
            writeln!(f, "  {}", family.descriptor)?;
            for instance in &family.instances {
                let marker = if instance.is_default { "*" } else { " " };
                writeln!(
                    f,
                    "   {} {} [{}] {}",
                    marker, instance.name, instance.scope, instance.description
                )?;
            }
        }
        if !self.profiles.is_empty() {
            writeln!(f, "  profiles: {}", self.profiles.join(", "))?;
        }
        write!(f, "  cached values: {}", self.cached_values)
    }
}
