//! Unit tests for the descriptor-to-family map
//!
//! Covers creating reads versus pure presence checks, replacement and
//! removal, owner back-references, the seeded container family, and the
//! single-visible-family guarantee under racing first accesses.

use plugboard_domain::TypeDescriptor;
use plugboard_registry::{
    ConcreteProducer, ContainerReference, DEFAULT_PROFILE, PluginFamily, RegistryNode,
    container_descriptor,
};
use std::sync::{Arc, Barrier};
use std::thread;

// ============================================================
// Creating reads and pure checks
// ============================================================

#[test]
fn test_get_creates_bare_family_on_miss() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");
    assert!(!node.families().has(&descriptor));

    let family = node.families().get(&descriptor);
    assert_eq!(family.descriptor(), &descriptor);
    assert!(family.is_empty(), "A bare fallback family holds no producers");
    assert!(
        node.families().has(&descriptor),
        "get must persist the family it creates"
    );
}

#[test]
fn test_get_returns_same_family_arc() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");

    let first = node.families().get(&descriptor);
    let second = node.families().get(&descriptor);
    assert!(
        Arc::ptr_eq(&first, &second),
        "Repeated gets must observe one family"
    );
}

#[test]
fn test_has_never_creates() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");

    assert!(!node.families().has(&descriptor));
    assert!(!node.families().has(&descriptor));
    assert_eq!(
        node.families().len(),
        1,
        "Only the seeded container family may exist"
    );
}

#[test]
fn test_set_replaces_existing_family() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");
    let original = node.families().get(&descriptor);

    let replacement = PluginFamily::new(descriptor.clone());
    replacement.add_instance(Arc::new(ConcreteProducer::named(
        TypeDescriptor::new("smtp::Mailer"),
        "smtp",
    )));
    node.families().set(replacement);

    let current = node.families().get(&descriptor);
    assert!(!Arc::ptr_eq(&original, &current), "set must replace, not merge");
    assert_eq!(current.instance_count(), 1);
}

#[test]
fn test_remove_detaches_family() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");
    node.families().get(&descriptor);

    let removed = node.families().remove(&descriptor);
    assert!(removed.is_some());
    assert!(!node.families().has(&descriptor));
    assert!(
        node.families().remove(&descriptor).is_none(),
        "Second removal finds nothing"
    );
}

#[test]
fn test_inspect_never_creates() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Mailer");

    assert!(node.families().inspect(&descriptor).is_none());
    assert!(!node.families().has(&descriptor));

    let family = node.families().get(&descriptor);
    let inspected = node.families().inspect(&descriptor).expect("stored now");
    assert!(Arc::ptr_eq(&family, &inspected));
}

// ============================================================
// Ownership and the container family
// ============================================================

#[test]
fn test_family_owner_backref() {
    let node = RegistryNode::create_root();
    let family = node.families().get(&TypeDescriptor::new("Mailer"));

    let owner = family.owner().expect("owner node is alive");
    assert!(Arc::ptr_eq(&owner, &node));
    assert_eq!(family.owner_profile().as_deref(), Some(DEFAULT_PROFILE));
}

#[test]
fn test_container_family_is_seeded() {
    let node = RegistryNode::create_root();
    assert!(node.families().has(&container_descriptor()));

    let family = node
        .families()
        .inspect(&container_descriptor())
        .expect("every node registers itself");
    let default = family
        .default_instance()
        .expect("self-reference is the default");
    let reference = default
        .downcast_ref::<ContainerReference>()
        .expect("container reference");
    let back = reference.node().expect("node is alive");
    assert!(
        Arc::ptr_eq(&back, &node),
        "Self-reference must point at its own node"
    );
}

// ============================================================
// Node registration surface
// ============================================================

#[test]
fn test_add_type_registers_concrete_producer() {
    let node = RegistryNode::create_root();
    let plugin = TypeDescriptor::new("Mailer");

    let family = node.add_type(&plugin, TypeDescriptor::new("smtp::Mailer"), None);
    assert_eq!(family.instance_count(), 1);
    assert_eq!(
        family.default_name().as_deref(),
        Some("smtp::Mailer"),
        "Sole producer is named after its concrete type"
    );

    let again = node.add_type(&plugin, TypeDescriptor::new("sendmail::Mailer"), Some("sendmail"));
    assert!(
        Arc::ptr_eq(&family, &again),
        "add_type must reuse the existing family"
    );
    assert_eq!(again.instance_count(), 2);
    assert!(node.has_instance(&plugin, "sendmail"));
}

#[test]
fn test_has_instance_and_default_never_create() {
    let node = RegistryNode::create_root();
    let plugin = TypeDescriptor::new("Mailer");

    assert!(!node.has_instance(&plugin, "any"));
    assert!(!node.has_default_for_type(&plugin));
    assert!(
        !node.families().has(&plugin),
        "Pure checks must not create families"
    );
}

#[test]
fn test_find_instance_and_all_instances() {
    let node = RegistryNode::create_root();
    let plugin = TypeDescriptor::new("Mailer");
    node.add_type(&plugin, TypeDescriptor::new("smtp::Mailer"), Some("smtp"));
    node.add_type(&plugin, TypeDescriptor::new("sendmail::Mailer"), Some("sendmail"));

    let found = node.find_instance(&plugin, "smtp").expect("registered");
    assert_eq!(found.name(), "smtp");
    assert!(node.find_instance(&plugin, "missing").is_none());

    let all = node.all_instances(&plugin);
    let names: Vec<&str> = all.iter().map(|instance| instance.name()).collect();
    assert_eq!(names, vec!["smtp", "sendmail"], "Registration order must hold");
}

#[test]
fn test_registration_clears_type_miss_memo() {
    let node = RegistryNode::create_root();
    let plugin = TypeDescriptor::new("Mailer");

    assert!(!node.has_family(&plugin));
    assert!(node.type_misses().contains(&plugin), "Miss must be memoized");

    node.add_type(&plugin, TypeDescriptor::new("smtp::Mailer"), None);
    assert!(
        node.type_misses().is_empty(),
        "Registration must clear the memo"
    );
    assert!(node.has_family(&plugin));
}

#[test]
fn test_add_family_clears_type_miss_memo() {
    let node = RegistryNode::create_root();
    let plugin = TypeDescriptor::new("Mailer");
    assert!(!node.has_family(&plugin));

    node.add_family(PluginFamily::new(plugin.clone()));
    assert!(node.type_misses().is_empty());
    assert!(node.has_family(&plugin));
}

// ============================================================
// Concurrency
// ============================================================

#[test]
fn test_concurrent_get_observes_single_family() {
    let node = RegistryNode::create_root();
    let descriptor = TypeDescriptor::new("Shared");
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let node = node.clone();
            let descriptor = descriptor.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                node.families().get(&descriptor)
            })
        })
        .collect();

    let families: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();
    for family in &families {
        assert!(
            Arc::ptr_eq(&families[0], family),
            "All threads must observe the same family"
        );
    }
    assert_eq!(
        node.families().len(),
        2,
        "One shared family plus the container self-registration"
    );
}
