use prestage_core::model::RepositoryDescriptor;
use std::path::Path;

/// The deployment's source repositories. Order matters: it is the
/// processing order and the order of the final report.
const REPOSITORIES: &[(&str, &str)] = &[
    ("gateway", "git@github.com:acme-platform/gateway.git"),
    ("identity", "git@github.com:acme-platform/identity.git"),
    ("catalog", "git@github.com:acme-platform/catalog.git"),
    ("orders", "git@github.com:acme-platform/orders.git"),
    ("web", "git@github.com:acme-platform/web.git"),
];

pub fn descriptors(root: &Path) -> Vec<RepositoryDescriptor> {
    REPOSITORIES
        .iter()
        .map(|(name, remote)| RepositoryDescriptor::new(*name, *remote, root.join(name)))
        .collect()
}
