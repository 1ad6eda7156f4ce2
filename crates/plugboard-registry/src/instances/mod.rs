//! Built-in producer implementations
//!
//! The producer variants the registry itself knows how to synthesize or
//! register: concrete-type producers, named references, deferred wrappers,
//! collection aggregates and the container self-reference. External
//! resolution pipelines add their own [`plugboard_domain::Instance`]
//! implementations next to these.

/// Collection aggregate producer
pub mod collection;
/// Concrete-type producer
pub mod concrete;
/// Container self-reference producer
pub mod container;
/// Deferred-invocation producer
pub mod deferred;
/// Named-reference producer
pub mod reference;

pub use collection::CollectionProducer;
pub use concrete::ConcreteProducer;
pub use container::ContainerReference;
pub use deferred::DeferredProducer;
pub use reference::ReferenceProducer;
