//! Registry summary rendering and serialization

use plugboard_domain::TypeDescriptor;
use plugboard_registry::{CloseGenericsPolicy, RegistryNode};
use std::sync::Arc;

#[test]
fn test_describe_captures_configuration() {
    let node = RegistryNode::create_root_named("Diag");
    let plugin = TypeDescriptor::new("Mailer");
    let family = node.add_type(&plugin, TypeDescriptor::new("smtp::Mailer"), Some("smtp"));
    node.add_type(&plugin, TypeDescriptor::new("sendmail::Mailer"), Some("sendmail"));
    family.set_default("smtp");
    node.add_family_policy(Arc::new(CloseGenericsPolicy::new()));
    node.profile("Staging");

    let summary = node.describe();
    assert_eq!(summary.profile, "Diag");
    assert_eq!(summary.profiles, vec!["Staging"]);
    assert_eq!(summary.policies, vec!["close-generics"]);
    assert_eq!(summary.cached_values, 0);

    let mailer = summary
        .families
        .iter()
        .find(|family| family.descriptor == "Mailer")
        .expect("family listed");
    assert_eq!(mailer.default.as_deref(), Some("smtp"));

    let names: Vec<&str> = mailer
        .instances
        .iter()
        .map(|instance| instance.name.as_str())
        .collect();
    assert_eq!(names, vec!["smtp", "sendmail"], "Registration order must hold");
    assert!(mailer.instances[0].is_default);
    assert!(!mailer.instances[1].is_default);
    assert_eq!(mailer.instances[0].scope, "transient");
}

#[test]
fn test_describe_families_sorted() {
    let node = RegistryNode::create_root();
    node.add_type(&TypeDescriptor::new("Zeta"), TypeDescriptor::new("impl::Zeta"), None);
    node.add_type(&TypeDescriptor::new("Alpha"), TypeDescriptor::new("impl::Alpha"), None);

    let summary = node.describe();
    let descriptors: Vec<&str> = summary
        .families
        .iter()
        .map(|family| family.descriptor.as_str())
        .collect();
    assert_eq!(descriptors, vec!["Alpha", "Zeta", "plugboard.RegistryNode"]);
}

#[test]
fn test_summary_serializes() {
    let node = RegistryNode::create_root_named("Diag");
    node.add_type(&TypeDescriptor::new("Mailer"), TypeDescriptor::new("smtp::Mailer"), Some("smtp"));

    let value = serde_json::to_value(node.describe()).expect("summary serializes");
    assert_eq!(value["profile"], "Diag");
    let families = value["families"].as_array().expect("families array");
    assert!(
        families.iter().any(|family| family["descriptor"] == "Mailer"),
        "Registered family must appear in the serialized form"
    );
}

#[test]
fn test_summary_display() {
    let node = RegistryNode::create_root_named("Diag");
    let family = node.add_type(&TypeDescriptor::new("Mailer"), TypeDescriptor::new("smtp::Mailer"), Some("smtp"));
    family.set_default("smtp");

    let rendered = node.describe().to_string();
    assert!(rendered.contains("Registry profile 'Diag'"));
    assert!(rendered.contains("Mailer"));
    assert!(
        rendered.contains("* smtp"),
        "Default marker must render, got:\n{rendered}"
    );
    assert!(rendered.contains("cached values: 0"));
}
