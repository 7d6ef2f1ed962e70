use crate::vcs::{RestoreOutcome, StashHandle, VcsUnavailable, VersionControl};
use anyhow::Context;
use git2::{Repository, StatusOptions};
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Production backend: read-only probing through libgit2, mutations through
/// the host `git` binary so clones and pulls use the operator's ambient
/// credential and SSH configuration.
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }
}

fn run_git(args: &[&str], workdir: Option<&Path>) -> anyhow::Result<()> {
    let mut command = Command::new("git");
    // Fail fast instead of blocking on an interactive credential prompt.
    command.args(args).env("GIT_TERMINAL_PROMPT", "0");
    if let Some(workdir) = workdir {
        command.current_dir(workdir);
    }
    let output = command
        .output()
        .with_context(|| format!("run git {}", args.join(" ")))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!(
        "git {} failed: {}",
        args.first().copied().unwrap_or_default(),
        stderr.trim()
    )
}

fn working_tree_has_changes(repo: &Repository) -> anyhow::Result<bool> {
    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let statuses = repo.statuses(Some(&mut options)).context("status repo")?;
    Ok(!statuses.is_empty())
}

impl VersionControl for SystemGit {
    fn ensure_available(&self) -> Result<(), VcsUnavailable> {
        let output = Command::new("git")
            .arg("--version")
            .output()
            .map_err(|err| VcsUnavailable {
                reason: format!("failed to invoke git --version: {err}"),
            })?;
        if !output.status.success() {
            return Err(VcsUnavailable {
                reason: "git --version exited with a failure".to_string(),
            });
        }
        Ok(())
    }

    fn clone_repo(&self, remote: &str, path: &Path) -> anyhow::Result<()> {
        info!(remote = %remote, path = %path.display(), "cloning repo");
        let path = path.to_string_lossy();
        run_git(&["clone", remote, path.as_ref()], None)
    }

    fn is_working_copy(&self, path: &Path) -> bool {
        Repository::open(path).is_ok()
    }

    fn current_branch(&self, path: &Path) -> Option<String> {
        let repo = Repository::open(path).ok()?;
        let head = repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(|name| name.to_string())
    }

    fn has_local_changes(&self, path: &Path) -> anyhow::Result<bool> {
        let repo = Repository::open(path).context("open repo")?;
        working_tree_has_changes(&repo)
    }

    fn set_aside_changes(&self, path: &Path, label: &str) -> anyhow::Result<StashHandle> {
        run_git(
            &["stash", "push", "--include-untracked", "-m", label],
            Some(path),
        )?;
        Ok(StashHandle {
            label: label.to_string(),
        })
    }

    fn restore_changes(&self, path: &Path, handle: &StashHandle) -> RestoreOutcome {
        // On conflict git keeps the stash entry; nothing is lost.
        match run_git(&["stash", "pop"], Some(path)) {
            Ok(()) => RestoreOutcome::Clean,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    stash = %handle.label,
                    error = %err,
                    "restoring set-aside changes conflicted"
                );
                RestoreOutcome::Conflict
            }
        }
    }

    fn fast_forward(&self, path: &Path) -> anyhow::Result<()> {
        run_git(&["pull", "--ff-only"], Some(path))
    }

    fn rebase(&self, path: &Path) -> anyhow::Result<()> {
        run_git(&["pull", "--rebase"], Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Commit, Oid, Signature};
    use tempfile::TempDir;

    fn init_repo(path: &Path) -> Repository {
        let repo = Repository::init(path).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "tester").unwrap();
            config.set_str("user.email", "tester@example.com").unwrap();
        }
        repo
    }

    fn commit_file(
        repo: &Repository,
        name: &str,
        contents: &str,
        parents: &[&Commit<'_>],
        update_ref: &str,
    ) -> Oid {
        let workdir = repo.workdir().unwrap();
        std::fs::write(workdir.join(name), contents).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("tester", "tester@example.com").unwrap();
        repo.commit(Some(update_ref), &sig, &sig, "commit", &tree, parents)
            .unwrap()
    }

    fn seeded_repo(tmp: &TempDir) -> Repository {
        let repo = init_repo(tmp.path());
        commit_file(&repo, "base.txt", "base", &[], "refs/heads/main");
        repo.set_head("refs/heads/main").unwrap();
        repo
    }

    #[test]
    fn git_binary_is_available() {
        SystemGit::new().ensure_available().unwrap();
    }

    #[test]
    fn detects_working_copy_and_branch() {
        let tmp = TempDir::new().unwrap();
        seeded_repo(&tmp);
        let git = SystemGit::new();
        assert!(git.is_working_copy(tmp.path()));
        assert_eq!(git.current_branch(tmp.path()).as_deref(), Some("main"));
    }

    #[test]
    fn plain_directory_is_not_a_working_copy() {
        let tmp = TempDir::new().unwrap();
        let git = SystemGit::new();
        assert!(!git.is_working_copy(tmp.path()));
    }

    #[test]
    fn detached_head_has_no_branch() {
        let tmp = TempDir::new().unwrap();
        let repo = seeded_repo(&tmp);
        let oid = repo.refname_to_id("refs/heads/main").unwrap();
        repo.set_head_detached(oid).unwrap();
        let git = SystemGit::new();
        assert!(git.current_branch(tmp.path()).is_none());
    }

    #[test]
    fn local_changes_cover_untracked_files() {
        let tmp = TempDir::new().unwrap();
        seeded_repo(&tmp);
        let git = SystemGit::new();
        assert!(!git.has_local_changes(tmp.path()).unwrap());

        std::fs::write(tmp.path().join("scratch.txt"), "wip").unwrap();
        assert!(git.has_local_changes(tmp.path()).unwrap());
    }

    #[test]
    fn stash_roundtrip_preserves_changes() {
        let tmp = TempDir::new().unwrap();
        seeded_repo(&tmp);
        let git = SystemGit::new();

        std::fs::write(tmp.path().join("base.txt"), "edited").unwrap();
        let handle = git.set_aside_changes(tmp.path(), "prestage:test").unwrap();
        assert!(!git.has_local_changes(tmp.path()).unwrap());

        let outcome = git.restore_changes(tmp.path(), &handle);
        assert_eq!(outcome, RestoreOutcome::Clean);
        assert!(git.has_local_changes(tmp.path()).unwrap());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("base.txt")).unwrap(),
            "edited"
        );
    }

    #[test]
    fn clone_from_missing_remote_fails() {
        let tmp = TempDir::new().unwrap();
        let git = SystemGit::new();
        let missing = tmp.path().join("no-such-remote");
        let target = tmp.path().join("clone");
        assert!(
            git.clone_repo(missing.to_str().unwrap(), &target)
                .is_err()
        );
    }

    #[test]
    fn clone_then_fast_forward_tracks_upstream() {
        let origin_dir = TempDir::new().unwrap();
        let origin = seeded_repo(&origin_dir);

        let work = TempDir::new().unwrap();
        let clone_path = work.path().join("clone");
        let git = SystemGit::new();
        git.clone_repo(origin_dir.path().to_str().unwrap(), &clone_path)
            .unwrap();
        assert!(git.is_working_copy(&clone_path));
        assert_eq!(git.current_branch(&clone_path).as_deref(), Some("main"));

        let base = origin.refname_to_id("refs/heads/main").unwrap();
        let base_commit = origin.find_commit(base).unwrap();
        let tip = commit_file(
            &origin,
            "next.txt",
            "next",
            &[&base_commit],
            "refs/heads/main",
        );

        git.fast_forward(&clone_path).unwrap();
        let clone = Repository::open(&clone_path).unwrap();
        assert_eq!(clone.refname_to_id("refs/heads/main").unwrap(), tip);
        assert!(clone_path.join("next.txt").exists());
    }

    #[test]
    fn diverged_history_refuses_fast_forward_but_rebases() {
        let origin_dir = TempDir::new().unwrap();
        let origin = seeded_repo(&origin_dir);
        let base = origin.refname_to_id("refs/heads/main").unwrap();

        let work = TempDir::new().unwrap();
        let clone_path = work.path().join("clone");
        let git = SystemGit::new();
        git.clone_repo(origin_dir.path().to_str().unwrap(), &clone_path)
            .unwrap();

        let clone = init_repo(&clone_path);
        let clone_base = clone.find_commit(base).unwrap();
        commit_file(
            &clone,
            "local.txt",
            "local",
            &[&clone_base],
            "refs/heads/main",
        );

        let origin_base = origin.find_commit(base).unwrap();
        commit_file(
            &origin,
            "remote.txt",
            "remote",
            &[&origin_base],
            "refs/heads/main",
        );

        assert!(git.fast_forward(&clone_path).is_err());
        git.rebase(&clone_path).unwrap();
        assert!(clone_path.join("local.txt").exists());
        assert!(clone_path.join("remote.txt").exists());
    }
}
