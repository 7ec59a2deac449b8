//! CLI execution context.

use std::path::{Path, PathBuf};

use alura_app::{ScrollRequest, Storefront, Viewport};
use alura_cache::{Cache, FileBackend};
use alura_executor::SystemClock;
use anyhow::{Context as _, Result};

use crate::config::{CliConfig, StorageBackend};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context, from `config_path` or the nearest config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config_path, config) = match config_path {
            Some(path) => (Some(path.to_path_buf()), CliConfig::load(path)?),
            None => match CliConfig::discover(&cwd)? {
                Some((path, config)) => (Some(path), config),
                None => (None, CliConfig::default()),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative config paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd)
    }

    /// Resolve a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Open the cart's durable storage.
    pub fn open_cache(&self) -> Result<Cache> {
        match self.config.storage.backend {
            StorageBackend::Memory => Ok(Cache::memory()),
            StorageBackend::File => {
                let dir = self.resolve_path(&self.config.storage.dir);
                self.output.debug(&format!("Cart storage: {}", dir.display()));
                let backend = FileBackend::open(&dir)
                    .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
                Ok(Cache::new(backend))
            }
        }
    }

    /// Open the storefront on the system clock.
    pub fn open_storefront(&self, clock: SystemClock) -> Result<Storefront> {
        let mut config = self.config.storefront.clone();
        if let Some(path) = config.catalog_path.take() {
            config.catalog_path = Some(self.resolve_path(&path));
        }

        Storefront::builder(config)
            .cache(self.open_cache()?)
            .clock(clock)
            .viewport(TerminalViewport {
                output: self.output.clone(),
            })
            .build()
            .context("Failed to open storefront")
    }
}

/// Viewport for a terminal: there is nothing to scroll, so transitions are
/// only noted in verbose output.
struct TerminalViewport {
    output: Output,
}

impl Viewport for TerminalViewport {
    fn scroll(&mut self, request: ScrollRequest) {
        match request {
            ScrollRequest::TopSmooth => self.output.debug("scroll to top"),
        }
    }
}
