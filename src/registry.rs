//! Compiled template groups and the build that produces them.
//!
//! Templates are organized by subdirectory. Every configured subdirectory
//! with at least one template file becomes a group holding its own files
//! plus every file of the base directory, so shared headers and footers are
//! available everywhere. Groups are compiled independently: two
//! subdirectories may both define `index.html` without clashing. The base
//! directory's files also form a group of their own under the key `""`.
//!
//! Within one group, sources are handed to the engine as subdirectory files
//! first and base files last, and the engine keeps the last source of a
//! given name. A base file therefore shadows a subdirectory file with the
//! same file name.

use crate::config::Config;
use crate::constants::BASE_GROUP;
use crate::error::{Error, Result};
use crate::ext::StrExt;
use crate::loader::{discover, get_loader, TemplateLoader};
use crate::renderer::{CompiledGroup, MiniJinjaRenderer, SourceFile, TemplateRenderer};
use crate::sink::{OutputSink, RenderStatus};
use indexmap::IndexMap;
use log::{debug, error, info, warn};
use minijinja::Value;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Compiled template groups keyed by subdirectory name.
#[derive(Debug, Default)]
pub struct Registry {
    groups: HashMap<String, CompiledGroup>,
}

/// Values every template is rendered with.
#[derive(Serialize)]
struct RenderContext<'a, D: Serialize> {
    development: bool,
    use_local_files: bool,
    cache_bust_files: &'a IndexMap<String, String>,
    injected_data: D,
}

/// Validates `config` and compiles every group it describes.
///
/// Nothing is returned unless every group compiled; a failure part way
/// through drops the groups built so far.
///
/// # Errors
/// * Any validation error of [`Config::validate`]
/// * `Error::Discovery` if a directory cannot be listed
/// * `Error::Compile` naming the first group the engine rejected
pub fn build(config: &mut Config) -> Result<Registry> {
    config.validate()?;

    let loader = get_loader(&config.source);
    let renderer = MiniJinjaRenderer::new(config.helpers.clone());
    let mut groups = HashMap::new();

    let base_files = discover(loader.as_ref(), &config.base_path, &config.extension)?;
    if !base_files.is_empty() {
        let group = compile_group(&renderer, loader.as_ref(), BASE_GROUP, &base_files)?;
        groups.insert(BASE_GROUP.to_string(), group);
    }

    for sub_dir in &config.sub_dirs {
        let dir = loader.join(&config.base_path, sub_dir);
        let mut files = discover(loader.as_ref(), &dir, &config.extension)?;
        if files.is_empty() {
            warn!(
                "No '.{}' files in '{}', skipping subdirectory '{sub_dir}'.",
                config.extension,
                dir.display()
            );
            continue;
        }

        files.extend(base_files.iter().cloned());
        let group = compile_group(&renderer, loader.as_ref(), sub_dir, &files)?;
        groups.insert(sub_dir.clone(), group);
    }

    info!(
        "Built {} template group(s) from '{}'.",
        groups.len(),
        config.base_path.display()
    );
    Ok(Registry { groups })
}

fn compile_group(
    renderer: &dyn TemplateRenderer,
    loader: &dyn TemplateLoader,
    group: &str,
    paths: &[PathBuf],
) -> Result<CompiledGroup> {
    debug!("Compiling group '{group}' from {} file(s).", paths.len());

    let sources = paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(SourceFile::new(name, loader.read_to_string(path)?))
        })
        .collect::<Result<Vec<_>>>()?;

    renderer.compile(&sources).map_err(|source| {
        let err = Error::Compile { group: group.to_string(), source };
        error!("{err}");
        err
    })
}

/// Appends `.extension` to `name` unless it already has an extension.
pub fn template_file_name(name: &str, extension: &str) -> String {
    if name.file_extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.{extension}")
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: &str) -> Option<&CompiledGroup> {
        self.groups.get(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Group keys in sorted order; the base group sorts first as `""`.
    pub fn groups(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Renders `template` from `group` into `sink`.
    ///
    /// `template` may omit the configured extension. The template sees
    /// `development`, `use_local_files`, `cache_bust_files` and
    /// `injected_data` (the serialized `data`).
    ///
    /// Failures are reported twice: the sink is told through
    /// [`OutputSink::fail`] (an unknown group is an internal error, a
    /// missing or failing template is not-found) and the error is returned.
    /// Output already streamed before an execution failure stays in the
    /// sink.
    pub fn render<S, D>(
        &self,
        config: &Config,
        sink: &mut S,
        group: &str,
        template: &str,
        data: D,
    ) -> Result<()>
    where
        S: OutputSink + ?Sized,
        D: Serialize,
    {
        let name = template_file_name(template, &config.extension);

        let Some(compiled) = self.groups.get(group) else {
            let err = Error::UnknownGroup { group: group.to_string() };
            error!("{err}");
            sink.fail(RenderStatus::InternalError, &err.to_string());
            return Err(err);
        };

        let context = Value::from_serialize(&RenderContext {
            development: config.development,
            use_local_files: config.use_local_files,
            cache_bust_files: &config.cache_busting_file_pairs,
            injected_data: data,
        });

        if let Err(source) = compiled.render_to(&name, context, &mut *sink) {
            let err = Error::Execution {
                group: group.to_string(),
                template: name,
                source,
            };
            error!("{err}");
            sink.fail(RenderStatus::NotFound, &err.to_string());
            return Err(err);
        }
        Ok(())
    }
}
