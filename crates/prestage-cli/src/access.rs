use prestage_core::model::RepositoryDescriptor;
use std::process::Command;
use tracing::{info, warn};

/// Advisory SSH reachability probe against the first SSH remote's host.
/// Informational only: a failure never blocks the run, since access
/// problems surface per repository as clone or update failures anyway.
pub fn advisory_ssh_check(descriptors: &[RepositoryDescriptor]) {
    let Some(host) = descriptors.iter().find_map(|d| ssh_host(&d.remote)) else {
        return;
    };
    info!(host = %host, "checking ssh access (advisory)");
    let result = Command::new("ssh")
        .args(["-T", "-o", "BatchMode=yes", "-o", "ConnectTimeout=5"])
        .arg(&host)
        .output();
    match result {
        // Hosting providers close the -T session with a nonzero status even
        // when authentication succeeds; 255 is ssh's own error exit.
        Ok(output) if output.status.code() == Some(255) => {
            warn!(
                host = %host,
                "ssh access check failed; clones may fail without credentials"
            );
        }
        Ok(_) => info!(host = %host, "ssh host reachable"),
        Err(err) => warn!(host = %host, error = %err, "could not run ssh access check"),
    }
}

/// Extracts `user@host` from an scp-style remote such as
/// `git@github.com:org/repo.git`.
fn ssh_host(remote: &str) -> Option<String> {
    let (userhost, _) = remote.split_once(':')?;
    if userhost.contains('@') && !userhost.contains('/') {
        Some(userhost.to_string())
    } else {
        None
    }
}
