#![allow(dead_code)]

use std::path::PathBuf;
use tmplgroups::{BufferSink, Config, HelperFunctions, RenderStatus, Templates};

/// Root of the checked-in test trees.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// The `templates` tree: shared files plus the `app`, `help` and `empty`
/// subdirectories.
pub fn site_config() -> Config {
    Config::on_disk(fixtures_dir().join("templates"), ["app", "help", "empty"])
        .with_helpers(HelperFunctions::defaults())
}

/// Builds the `templates` tree with the given tweaks applied to its config.
pub fn built_site(tweak: impl FnOnce(Config) -> Config) -> Templates {
    let mut templates = Templates::new(tweak(site_config()));
    templates.build().unwrap();
    templates
}

/// Renders into a fresh buffer and returns the outcome alongside it.
pub fn render_to_buffer(
    templates: &Templates,
    group: &str,
    template: &str,
    data: serde_json::Value,
) -> (bool, RenderStatus, String) {
    let mut sink = BufferSink::new();
    let ok = templates.render(&mut sink, group, template, data).is_ok();
    (ok, sink.status(), sink.body_string())
}
