// supersync-core/src/infrastructure/template/jinja.rs

// dbt renders profiles.yml through Jinja before parsing it, mostly for
// {{ env_var('DBT_PASSWORD') }}. This renderer reproduces that subset.

use crate::infrastructure::error::InfrastructureError;
use minijinja::{Environment, ErrorKind};

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);

        // env_var(name, default=None), same contract as dbt
        env.add_function(
            "env_var",
            |name: String, default: Option<String>| -> Result<String, minijinja::Error> {
                match std::env::var(&name) {
                    Ok(value) => Ok(value),
                    Err(_) => default.ok_or_else(|| {
                        minijinja::Error::new(
                            ErrorKind::InvalidOperation,
                            format!("Env var required but not provided: '{}'", name),
                        )
                    }),
                }
            },
        );

        // The YAML parser does the actual typing after rendering
        env.add_filter("as_number", |value: String| value);
        env.add_filter("as_bool", |value: String| value);
        env.add_filter("as_text", |value: String| value);

        Self { env }
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> JinjaRenderer<'a> {
    pub fn render(&self, template_str: &str) -> Result<String, InfrastructureError> {
        self.env
            .render_str(template_str, ())
            .map_err(InfrastructureError::TemplateError)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_plain_yaml_is_untouched() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let source = "my_project:\n  outputs:\n    dev: {}\n";
        assert_eq!(renderer.render(source)?, source);
        Ok(())
    }

    #[test]
    fn test_env_var_default() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let result =
            renderer.render("host: {{ env_var('SUPERSYNC_TEST_SURELY_UNSET_HOST', 'localhost') }}")?;
        assert_eq!(result, "host: localhost");
        Ok(())
    }

    #[test]
    fn test_env_var_missing_fails() {
        let renderer = JinjaRenderer::new();
        let result = renderer.render("password: {{ env_var('SUPERSYNC_TEST_SURELY_UNSET_PWD') }}");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("SUPERSYNC_TEST_SURELY_UNSET_PWD"));
    }

    #[test]
    fn test_env_var_from_environment() -> Result<()> {
        // PATH is always set for the test process
        let expected = std::env::var("PATH")?;
        let renderer = JinjaRenderer::new();
        let result = renderer.render("{{ env_var('PATH') | as_text }}")?;
        assert_eq!(result, expected);
        Ok(())
    }
}
