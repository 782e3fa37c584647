//! The `render` command

use std::path::{Path, PathBuf};

use placeholder_core::{RenderOptions, Renderer};
use serde_json::Value;

use super::read_document;
use crate::error::Result;
use crate::format::Format;

/// Inputs of a render run
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub template: PathBuf,
    pub context: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<Format>,
    pub pretty: bool,
}

/// Render the template file and return the output text
pub fn render_files(request: &RenderRequest) -> Result<String> {
    let options = load_options(request.config.as_deref())?;
    let (template, template_format) = read_document(&request.template)?;
    let (context, _) = read_document(&request.context)?;

    let rendered: Value = Renderer::new(options).replace_placeholders(&template, &context)?;

    let format = request.output.unwrap_or(template_format);
    format.render(&rendered, request.pretty)
}

fn load_options(config: Option<&Path>) -> Result<RenderOptions> {
    match config {
        Some(path) => Ok(RenderOptions::load(path)?),
        None => Ok(RenderOptions::default()),
    }
}

/// Run the render command, printing to stdout
pub fn run_render(request: &RenderRequest) -> Result<()> {
    let output = render_files(request)?;
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn request(dir: &TempDir, template: &str, context: &str) -> RenderRequest {
        RenderRequest {
            template: dir.path().join(template),
            context: dir.path().join(context),
            config: None,
            output: None,
            pretty: false,
        }
    }

    #[test]
    fn test_render_json_template() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("body.json"),
            r#"{"id": "{{user.id:int}}", "$truto_merge": "{{extra:json}}"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("ctx.yaml"),
            "user:\n  id: \"42\"\nextra:\n  source: cli\n",
        )
        .unwrap();

        let output = render_files(&request(&dir, "body.json", "ctx.yaml")).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value, serde_json::json!({"id": 42, "source": "cli"}));
    }

    #[test]
    fn test_render_with_config_and_output_format() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("body.yaml"), "a: 1\n$merge: '{{m:json}}'\n").unwrap();
        fs::write(dir.path().join("ctx.json"), r#"{"m": {"b": "two"}}"#).unwrap();
        fs::write(dir.path().join("render.toml"), "merge_key = \"$merge\"\n").unwrap();

        let mut req = request(&dir, "body.yaml", "ctx.json");
        req.config = Some(dir.path().join("render.toml"));
        req.output = Some(Format::Json);

        assert_eq!(render_files(&req).unwrap(), r#"{"a":1,"b":"two"}"#);
    }

    #[test]
    fn test_render_missing_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ctx.json"), "{}").unwrap();

        let err = render_files(&request(&dir, "missing.json", "ctx.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
