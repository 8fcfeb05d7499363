use crate::config::Config;
use crate::error::Result;
use crate::registry::{self, Registry};
use crate::sink::OutputSink;
use log::debug;
use serde::Serialize;

/// A configuration together with the registry built from it.
///
/// `build` takes `&mut self` and `render` takes `&self`, so a single owner
/// can never render while rebuilding. Callers sharing one instance across
/// threads wrap it in their own lock, or build once before serving.
///
/// # Example
///
/// ```rust,no_run
/// use tmplgroups::{BufferSink, Config, HelperFunctions, Templates};
/// use serde_json::json;
///
/// let config = Config::on_disk("templates", ["app", "docs"])
///     .with_helpers(HelperFunctions::defaults());
/// let mut templates = Templates::new(config);
/// templates.build()?;
///
/// let mut sink = BufferSink::new();
/// templates.render(&mut sink, "app", "index", json!({ "user": "ann" }))?;
/// # Ok::<(), tmplgroups::error::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Templates {
    config: Config,
    registry: Registry,
}

impl Templates {
    /// Wraps `config`; nothing is renderable until [`Templates::build`].
    pub fn new(config: Config) -> Self {
        Self { config, registry: Registry::new() }
    }

    /// Validates the config and rebuilds every group.
    ///
    /// The previous registry is discarded first. On failure the registry
    /// is left empty, never partially built or stale.
    pub fn build(&mut self) -> Result<()> {
        self.registry.clear();
        let registry = registry::build(&mut self.config)?;
        debug!("Replacing registry with {} group(s).", registry.len());
        self.registry = registry;
        Ok(())
    }

    /// Renders `template` from `group` into `sink`. See [`Registry::render`].
    pub fn render<S, D>(&self, sink: &mut S, group: &str, template: &str, data: D) -> Result<()>
    where
        S: OutputSink + ?Sized,
        D: Serialize,
    {
        self.registry.render(&self.config, sink, group, template, data)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the config. Changes that affect discovery take
    /// effect on the next [`Templates::build`]; render-time values such as
    /// `development` apply immediately.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
