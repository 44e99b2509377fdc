use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the plugin root explicitly.
pub const ROOT_ENV_VAR: &str = "WEFT_PLUGIN_ROOT";

/// Typed access to the plugin repository layout.
///
/// The engine is read-only: a `PluginDir` never creates directories or
/// files, it only names them.
#[derive(Debug, Clone)]
pub struct PluginDir {
    root: PathBuf,
}

impl PluginDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve the plugin root.
    ///
    /// Order: explicit path, then `WEFT_PLUGIN_ROOT`, then walking up from
    /// the current directory, then the first plausible child of
    /// `~/.claude/plugins`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !looks_like_plugin_root(path) {
                bail!(
                    "{} is not a plugin root (no context/ directory)",
                    path.display()
                );
            }
            return Ok(Self::new(path));
        }

        if let Ok(env_root) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(env_root);
            if !looks_like_plugin_root(&path) {
                bail!(
                    "{ROOT_ENV_VAR}={} is not a plugin root (no context/ directory)",
                    path.display()
                );
            }
            return Ok(Self::new(path));
        }

        if let Ok(cwd) = std::env::current_dir() {
            let mut dir = cwd.as_path();
            loop {
                if looks_like_plugin_root(dir) {
                    return Ok(Self::new(dir));
                }
                match dir.parent() {
                    Some(parent) => dir = parent,
                    None => break,
                }
            }
        }

        if let Some(home) = dirs::home_dir() {
            let plugins = home.join(".claude").join("plugins");
            if let Ok(entries) = std::fs::read_dir(&plugins) {
                let mut candidates: Vec<PathBuf> = entries
                    .flatten()
                    .map(|e| e.path())
                    .filter(|p| looks_like_plugin_root(p))
                    .collect();
                candidates.sort();
                if let Some(first) = candidates.into_iter().next() {
                    return Ok(Self::new(first));
                }
            }
        }

        bail!("No plugin root found. Pass --root or set {ROOT_ENV_VAR}.")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn context_dir(&self) -> PathBuf {
        self.root.join("context")
    }

    pub fn domain_dir(&self, domain: &str) -> PathBuf {
        self.context_dir().join(domain)
    }

    pub fn cross_domain_file(&self) -> PathBuf {
        self.context_dir().join("cross_domain.md")
    }

    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.root.join("agents")
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.root.join("commands")
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.root.join("hooks")
    }

    pub fn hooks_file(&self) -> PathBuf {
        self.hooks_dir().join("hooks.json")
    }

    pub fn hooks_guide(&self) -> PathBuf {
        self.hooks_dir().join("HOOKS_GUIDE.md")
    }

    pub fn mcps_dir(&self) -> PathBuf {
        self.root.join("mcps")
    }

    /// Absolute path of a context file id (`domain/stem`).
    pub fn file_path(&self, id: &str) -> Option<PathBuf> {
        let (domain, stem) = id.split_once('/')?;
        Some(self.domain_dir(domain).join(format!("{stem}.md")))
    }
}

fn looks_like_plugin_root(path: &Path) -> bool {
    path.join("context").is_dir()
}
