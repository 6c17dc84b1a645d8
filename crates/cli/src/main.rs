//! typegen - TypeScript declarations from an API specification
//!
//! Reads a JSON or YAML specification, generates declarations for every
//! shared schema and endpoint, and writes them to a file or stdout.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use typegen_core::{GenerateError, GenerateOptions, HttpMethod, Specification, generate_spec};

#[derive(Debug, Parser)]
#[command(
    name = "typegen",
    version,
    about = "Generate TypeScript declarations from an OpenAPI-style specification"
)]
struct Args {
    /// Specification file (JSON or YAML)
    input: PathBuf,

    /// Write declarations to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Name of the root declaration (defaults to one derived from info.title)
    #[arg(long)]
    root_name: Option<String>,

    /// Only assemble operations with this method; repeat for several
    #[arg(long = "method", value_name = "METHOD", value_parser = parse_method)]
    methods: Vec<HttpMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

fn parse_method(raw: &str) -> Result<HttpMethod, String> {
    HttpMethod::parse(&raw.to_ascii_lowercase()).ok_or_else(|| {
        let supported: Vec<_> = HttpMethod::ALL.iter().map(HttpMethod::as_str).collect();
        format!("unsupported method `{raw}` (expected one of: {})", supported.join(", "))
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;

    let format = args.format.unwrap_or_else(|| Format::from_path(&args.input));
    debug!(input = %args.input.display(), format = ?format, "Loading specification.");
    let spec = match format {
        Format::Json => Specification::from_json(&source)?,
        Format::Yaml => Specification::from_yaml(&source)?,
    };

    let options = GenerateOptions {
        root_name: args.root_name.clone(),
        methods: (!args.methods.is_empty()).then(|| args.methods.clone()),
    };
    let generated = generate_spec(spec, &options)?;
    info!(
        title = %generated.title,
        version = %generated.version,
        root = %generated.type_root,
        degraded = generated.degradations.len(),
        "Generated declarations."
    );

    match &args.output {
        Some(path) => fs::write(path, &generated.types).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => io::stdout()
            .lock()
            .write_all(generated.types.as_bytes())
            .map_err(CliError::Stdout),
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SPEC_JSON: &str = r##"{
  "info": { "title": "Pets", "version": "1.0.0" },
  "components": { "schemas": {
    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
  } },
  "paths": {
    "/pets": {
      "get": { "responses": { "200": { "content": { "application/json": { "schema": {
        "type": "array", "items": { "$ref": "#/components/schemas/Pet" }
      } } } } } },
      "delete": { "responses": { "204": {} } }
    }
  }
}"##;

    const SPEC_YAML: &str = r##"
info:
  title: Pets
  version: 1.0.0
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
paths: {}
"##;

    fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("typegen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "pets.json", SPEC_JSON);
        let output = dir.path().join("pets.ts");

        let args = parse(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        run(&args).unwrap();

        let types = fs::read_to_string(&output).unwrap();
        assert!(types.contains("export interface Pet {\n  name: string;\n}\n"));
        assert!(types.contains("export type PetsGetResponse200 = Pet[];\n"));
        assert!(types.contains("  delete: PetsDelete;\n"));
        // The root takes the API title, which the /pets path record already holds.
        assert!(types.contains("export interface Pets2 {\n  title: \"Pets\";\n"));
        assert!(types.ends_with("  Pets: Pets;\n}\n"));
    }

    #[test]
    fn test_run_infers_yaml_from_extension() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "pets.yml", SPEC_YAML);
        let output = dir.path().join("pets.ts");

        run(&parse(&[input.to_str().unwrap(), "--output", output.to_str().unwrap()])).unwrap();

        let types = fs::read_to_string(&output).unwrap();
        assert!(types.starts_with("export interface Pet {"));
    }

    #[test]
    fn test_run_explicit_format_overrides_extension() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "pets.txt", SPEC_YAML);
        let output = dir.path().join("pets.ts");

        let args = parse(&[
            input.to_str().unwrap(),
            "--format",
            "yaml",
            "-o",
            output.to_str().unwrap(),
        ]);
        run(&args).unwrap();
        assert!(output.exists());

        let args = parse(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        assert!(matches!(run(&args), Err(CliError::Generate(GenerateError::Json(_)))));
    }

    #[test]
    fn test_run_applies_options() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "pets.json", SPEC_JSON);
        let output = dir.path().join("pets.ts");

        let args = parse(&[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--root-name",
            "PetApi",
            "--method",
            "GET",
        ]);
        assert_eq!(args.methods, [HttpMethod::Get]);
        run(&args).unwrap();

        let types = fs::read_to_string(&output).unwrap();
        assert!(types.contains("export interface PetApi {"));
        assert!(!types.contains("PetsDelete"));
    }

    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let args = parse(&[dir.path().join("missing.json").to_str().unwrap()]);
        let err = run(&args).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().starts_with("Failed to read "));
    }

    #[test]
    fn test_parse_method_rejects_unknown() {
        assert_eq!(parse_method("Patch"), Ok(HttpMethod::Patch));
        let err = parse_method("options").unwrap_err();
        assert_eq!(
            err,
            "unsupported method `options` (expected one of: get, post, put, patch, delete)"
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("api.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api")), Format::Json);
    }
}
