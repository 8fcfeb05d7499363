use crate::{
    cli::{Commands, RenderArgs, SourceArgs},
    config::{Config, ConfigFile},
    constants::STDIN_INDICATOR,
    error::Result,
    ext::PathExt,
    loader::list_source_files,
    renderer::HelperFunctions,
    sink::WriterSink,
    templates::Templates,
};
use log::debug;
use std::io::{self, Read, Write};

/// Label printed for the group built from the base directory.
const BASE_GROUP_LABEL: &str = "(base)";

/// Dispatches one parsed command against a template tree.
pub struct Runner {
    command: Commands,
}

impl Runner {
    pub fn new(command: Commands) -> Self {
        Self { command }
    }

    /// Runs the command with stdin as input and stdout as output.
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(io::stdin(), &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Runs the command reading `--data -` from `input` and writing to `out`.
    pub fn run_with<R: Read, W: Write>(self, input: R, out: &mut W) -> Result<()> {
        match self.command {
            Commands::Render(args) => render(&args, input, out),
            Commands::List(args) => list(&args, out),
            Commands::Files(args) => files(&args, out),
        }
    }
}

/// Builds a [`Config`] from an optional config file overridden by flags.
///
/// Subdirectories given on the command line replace those of the file.
pub fn load_config(args: &SourceArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading config file '{}'.", path.display());
            ConfigFile::load(path)?.into_config()
        }
        None => Config::new(),
    };

    if let Some(base_path) = &args.base_path {
        config.base_path = base_path.clone();
    }
    if !args.sub_dirs.is_empty() {
        config.sub_dirs = args.sub_dirs.clone();
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.clone();
    }
    Ok(config.with_helpers(HelperFunctions::defaults()))
}

fn parse_data(data: Option<&str>, input: impl Read) -> Result<serde_json::Value> {
    let raw = match data {
        None => return Ok(serde_json::Value::Null),
        Some(STDIN_INDICATOR) => read_from(input)?,
        Some(text) => text.to_string(),
    };
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(&raw)?)
}

fn read_from(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

fn render<R: Read, W: Write>(args: &RenderArgs, input: R, out: &mut W) -> Result<()> {
    let data = parse_data(args.data.as_deref(), input)?;

    let mut config = load_config(&args.source)?;
    // Flags can only switch these on; the file decides otherwise.
    config.development |= args.development;
    config.use_local_files |= args.use_local_files;
    config
        .cache_busting_file_pairs
        .extend(args.cache_bust.iter().cloned());

    let mut templates = Templates::new(config);
    templates.build()?;

    let mut sink = WriterSink::new(&mut *out);
    templates.render(&mut sink, &args.group, &args.template, data)?;
    debug!("Rendered '{}' from group '{}'.", args.template, args.group);
    Ok(())
}

fn list<W: Write>(args: &SourceArgs, out: &mut W) -> Result<()> {
    let mut templates = Templates::new(load_config(args)?);
    templates.build()?;

    let registry = templates.registry();
    for group in registry.groups() {
        let label = if group.is_empty() { BASE_GROUP_LABEL } else { group };
        writeln!(out, "{label}")?;
        if let Some(compiled) = registry.get(group) {
            for name in compiled.template_names() {
                writeln!(out, "  {name}")?;
            }
        }
    }
    Ok(())
}

fn files<W: Write>(args: &SourceArgs, out: &mut W) -> Result<()> {
    let mut config = load_config(args)?;
    config.validate()?;
    for path in list_source_files(&config)? {
        writeln!(out, "{}", path.to_slash())?;
    }
    Ok(())
}

/// Main entry point for CLI execution
pub fn run(command: Commands) -> Result<()> {
    Runner::new(command).run()
}
