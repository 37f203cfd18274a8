//! `berth setup-shell` — Install shell aliases into existing profiles.
//!
//! Appends a marker-guarded block defining `bth` and `bth-stop` to every
//! shell profile that exists in the home directory. Re-running is a
//! no-op: profiles already carrying the marker are left untouched.

use std::path::{Path, PathBuf};

use clap::Args;

const MARKER: &str = "# --- berth shell aliases ---";
const PROFILES: &[&str] = &[".bashrc", ".zshrc", ".bash_profile"];

/// Arguments for the `setup-shell` command.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Print the alias block instead of editing any profile.
    #[arg(long)]
    pub dry_run: bool,
}

/// Executes the `setup-shell` command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved or a
/// profile cannot be read or written.
pub fn execute(args: &SetupArgs) -> anyhow::Result<()> {
    let exe = std::env::current_exe()?;
    let block = alias_block(&exe);

    if args.dry_run {
        println!("{block}");
        return Ok(());
    }

    let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    let installed = install_aliases(Path::new(&home), &block)?;

    if installed.is_empty() {
        println!("Shell aliases already installed, nothing to do.");
    } else {
        println!("Shell aliases installed:");
        for path in &installed {
            println!("  {}", path.display());
        }
        println!("Reload your shell (e.g. `source ~/.bashrc`) to use them.");
    }
    Ok(())
}

/// The marker-guarded block appended to each profile.
fn alias_block(exe: &Path) -> String {
    format!(
        "{MARKER}\n\
         alias bth=\"{exe} start\"\n\
         alias bth-stop=\"{exe} stop\"\n\
         # ---------------------------\n",
        exe = exe.display()
    )
}

/// Appends the block to every existing profile that does not already
/// carry the marker. Returns the profiles that were modified.
fn install_aliases(home: &Path, block: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut installed = Vec::new();
    for profile in PROFILES {
        let path = home.join(profile);
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path)?;
        if content.contains(MARKER) {
            continue;
        }
        let mut updated = content;
        if !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push('\n');
        updated.push_str(block);
        std::fs::write(&path, updated)?;
        tracing::info!(path = %path.display(), "shell aliases installed");
        installed.push(path);
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_into_existing_profiles_only() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(home.path().join(".bashrc"), "export PATH=$PATH\n").expect("fixture");

        let block = alias_block(Path::new("/usr/local/bin/berth"));
        let installed = install_aliases(home.path(), &block).expect("install");

        assert_eq!(installed.len(), 1);
        let content =
            std::fs::read_to_string(home.path().join(".bashrc")).expect("profile reads");
        assert!(content.contains(MARKER));
        assert!(content.contains("alias bth="));
        assert!(!home.path().join(".zshrc").exists());
    }

    #[test]
    fn second_run_is_a_noop() {
        let home = tempfile::tempdir().expect("tempdir");
        std::fs::write(home.path().join(".zshrc"), "").expect("fixture");

        let block = alias_block(Path::new("/usr/local/bin/berth"));
        let first = install_aliases(home.path(), &block).expect("install");
        let before = std::fs::read_to_string(home.path().join(".zshrc")).expect("read");
        let second = install_aliases(home.path(), &block).expect("install");
        let after = std::fs::read_to_string(home.path().join(".zshrc")).expect("read");

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(before, after);
    }
}
