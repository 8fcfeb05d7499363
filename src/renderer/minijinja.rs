use crate::renderer::helpers::HelperFunctions;
use crate::renderer::interface::{SourceFile, TemplateRenderer};
use minijinja::{AutoEscape, Environment, Value};
use std::io;

/// MiniJinja-based template engine.
#[derive(Debug, Default, Clone)]
pub struct MiniJinjaRenderer {
    /// Functions attached to every group this renderer compiles
    helpers: HelperFunctions,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with the given helpers.
    pub fn new(helpers: HelperFunctions) -> Self {
        Self { helpers }
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        // Every group renders HTML, whatever the configured file extension.
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        for (name, function) in self.helpers.iter() {
            env.add_global(name.to_string(), function.clone());
        }
        env
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn compile(&self, sources: &[SourceFile]) -> Result<CompiledGroup, minijinja::Error> {
        let mut env = self.environment();
        for source in sources {
            env.add_template_owned(source.name.clone(), source.content.clone())?;
        }
        Ok(CompiledGroup { env })
    }
}

/// A compiled, immutable set of templates addressable by file name.
#[derive(Debug)]
pub struct CompiledGroup {
    env: Environment<'static>,
}

impl CompiledGroup {
    /// Names of every template in the group, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.env.templates().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Renders template `name` with `context`, streaming into `out`.
    pub fn render_to<W: io::Write>(
        &self,
        name: &str,
        context: Value,
        out: W,
    ) -> Result<(), minijinja::Error> {
        let template = self.env.get_template(name)?;
        template.render_captured_to(context, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn compile(sources: &[(&str, &str)]) -> CompiledGroup {
        let sources: Vec<SourceFile> =
            sources.iter().map(|(name, content)| SourceFile::new(*name, *content)).collect();
        MiniJinjaRenderer::new(HelperFunctions::defaults()).compile(&sources).unwrap()
    }

    fn render(group: &CompiledGroup, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        let mut out = Vec::new();
        group.render_to(name, ctx, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn templates_can_include_each_other() {
        let group = compile(&[
            ("index.html", r#"{% include "header.html" %}<main>body</main>"#),
            ("header.html", "<header>top</header>"),
        ]);
        let rendered = render(&group, "index.html", context! {}).unwrap();
        assert_eq!(rendered, "<header>top</header><main>body</main>");
    }

    #[test]
    fn later_sources_replace_earlier_ones() {
        let group = compile(&[("banner.html", "first"), ("banner.html", "second")]);
        assert_eq!(render(&group, "banner.html", context! {}).unwrap(), "second");
        assert_eq!(group.template_names(), vec!["banner.html"]);
    }

    #[test]
    fn output_is_html_escaped_for_any_extension() {
        let group = compile(&[("page.tmpl", "{{ value }}")]);
        let rendered = render(&group, "page.tmpl", context! { value => "<b>" }).unwrap();
        assert_eq!(rendered, "&lt;b&gt;");
    }

    #[test]
    fn helpers_are_callable() {
        let group = compile(&[(
            "h.html",
            r#"{{ add_int(3, 4) }} {{ index_of("d", "asdf") }} {{ date_reformat("2020-01-32", "%m/%d/%Y") }}"#,
        )]);
        assert_eq!(render(&group, "h.html", context! {}).unwrap(), "7 2 2020-01-32");
    }

    #[test]
    fn syntax_errors_fail_compilation() {
        let result = MiniJinjaRenderer::default()
            .compile(&[SourceFile::new("bad.html", "{% if %}")]);
        assert!(result.is_err());
    }

    #[test]
    fn render_to_streams_into_writer() {
        let group = compile(&[("a.html", "hello {{ name }}")]);
        let mut out = Vec::new();
        group.render_to("a.html", context! { name => "world" }, &mut out).unwrap();
        assert_eq!(out, b"hello world");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let group = compile(&[("a.html", "a")]);
        assert!(!group.contains("b.html"));
        assert!(render(&group, "b.html", context! {}).is_err());
    }
}
