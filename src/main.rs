//! argschema - schema-driven argument parsing for shell scripts.

use anyhow::{Context, Result};
use argschema::{
    generate_error_output, generate_exports, generate_json_string, Args, Config, Schema,
};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Schema-driven short-flag argument parsing.
#[derive(Parser, Debug)]
#[command(name = "argschema", version, about, disable_help_subcommand = true)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the schema comes from.
#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["schema", "config"])))]
struct SchemaSource {
    /// Schema string, e.g. "l,p#,d##,n*,f[*]"
    #[arg(long)]
    schema: Option<String>,

    /// JSON configuration with schema, prefix and variable names
    #[arg(long)]
    config: Option<String>,
}

impl SchemaSource {
    fn load(&self) -> Result<Config> {
        match (&self.schema, &self.config) {
            (Some(schema), _) => Ok(Config::from_schema(schema.clone())),
            (None, Some(json)) => Config::from_json(json).context("failed to parse config JSON"),
            (None, None) => anyhow::bail!("either --schema or --config is required"),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Sourceable file of export statements; prints its path
    Exports,
    /// JSON report on stdout
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse arguments against a schema
    Parse {
        #[command(flatten)]
        source: SchemaSource,

        /// Environment variable prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Exports)]
        format: Format,

        /// Arguments to parse
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Compile a schema and list its flags
    Check {
        #[command(flatten)]
        source: SchemaSource,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            source,
            prefix,
            format,
            args,
        } => {
            let mut cfg = source.load()?;
            if prefix.is_some() {
                cfg.prefix = prefix;
            }
            let schema = cfg.validate().context("invalid config")?;

            match format {
                Format::Exports => {
                    let path = match Args::with_schema(&schema, &args) {
                        Ok(parsed) => generate_exports(&parsed, &cfg)
                            .context("failed to generate output file")?,
                        Err(err) => {
                            tracing::debug!(kind = ?err.kind(), flag = ?err.flag(), "argument error");
                            generate_error_output(&err.to_string())
                                .context("failed to generate error file")?
                        }
                    };
                    println!("{}", path.display());
                }
                Format::Json => {
                    let parsed =
                        Args::with_schema(&schema, &args).context("failed to parse arguments")?;
                    println!("{}", generate_json_string(&parsed)?);
                }
            }
        }
        Commands::Check { source } => {
            let cfg = source.load()?;
            let schema = cfg.validate().context("invalid config")?;
            print!("{}", describe_schema(&schema));
        }
    }

    Ok(())
}

/// One `<element>\t<kind>` line per declared flag, e.g. `p#\tinteger`.
fn describe_schema(schema: &Schema) -> String {
    schema
        .elements()
        .map(|(flag, kind)| format!("{}{}\t{}\n", flag, kind.suffix(), kind))
        .collect()
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "argschema=debug"
    } else {
        "argschema=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_subcommand_parses_schema() {
        let cli = Cli::try_parse_from(["argschema", "parse", "--schema", "l,p#", "--"]).unwrap();

        match cli.command {
            Commands::Parse {
                source,
                prefix,
                format,
                args,
            } => {
                assert_eq!(source.schema, Some("l,p#".to_string()));
                assert!(source.config.is_none());
                assert!(prefix.is_none());
                assert_eq!(format, Format::Exports);
                assert!(args.is_empty());
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_parse_subcommand_parses_args() {
        let cli = Cli::try_parse_from([
            "argschema",
            "parse",
            "--schema",
            "l,p#",
            "--format",
            "json",
            "--",
            "-lp",
            "8080",
            "input.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { args, format, .. } => {
                assert_eq!(format, Format::Json);
                assert_eq!(args, vec!["-lp", "8080", "input.txt"]);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_parse_subcommand_requires_source() {
        let result = Cli::try_parse_from(["argschema", "parse", "--"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_subcommand_rejects_both_sources() {
        let result = Cli::try_parse_from([
            "argschema",
            "parse",
            "--schema",
            "a",
            "--config",
            r#"{"schema":"a"}"#,
            "--",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_subcommand_with_config() {
        let cli = Cli::try_parse_from([
            "argschema",
            "check",
            "--config",
            r#"{"schema":"a,b#"}"#,
        ])
        .unwrap();

        match cli.command {
            Commands::Check { source } => {
                let cfg = source.load().unwrap();
                assert_eq!(cfg.schema, "a,b#");
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_describe_schema_lists_elements() {
        let schema = Schema::compile("l,p#,d##,n*,f[*]").unwrap();
        assert_eq!(
            describe_schema(&schema),
            "l\tboolean\np#\tinteger\nd##\tdouble\nn*\tstring\nf[*]\tstring-array\n"
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli =
            Cli::try_parse_from(["argschema", "check", "--schema", "a", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["argschema"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help() {
        // Verify the command can generate help without panicking
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prefix_priority_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "argschema",
            "parse",
            "--config",
            r#"{"schema":"a","prefix":"CONFIG_"}"#,
            "--prefix",
            "CLI_",
            "--",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { source, prefix, .. } => {
                let mut cfg = source.load().unwrap();
                if prefix.is_some() {
                    cfg.prefix = prefix;
                }
                assert_eq!(cfg.effective_prefix(), "CLI_");
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_prefix_default_when_neither_set() {
        let cli =
            Cli::try_parse_from(["argschema", "parse", "--schema", "a", "--"]).unwrap();

        match cli.command {
            Commands::Parse { source, prefix, .. } => {
                assert!(prefix.is_none());
                let cfg = source.load().unwrap();
                assert_eq!(cfg.effective_prefix(), "ARGS_");
            }
            _ => panic!("Expected Parse command"),
        }
    }
}
