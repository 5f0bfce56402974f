use crate::template::{RecordField, TemplateId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lovecert")]
#[command(author, version, long_about = None)]
#[command(about = "Compose decorative marriage-certificate images")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON config file (scale, filename prefix, photo limit, link schemes, font)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a single certificate
    Render {
        /// Template id: traditional, modern, elegant, vintage (default from config)
        #[arg(short, long, value_parser = parse_template)]
        template: Option<TemplateId>,

        /// JSON file with one record (fields not given fall back to defaults)
        #[arg(short, long)]
        json: Option<String>,

        /// First participant's name
        #[arg(short = 'a', long)]
        husband_name: Option<String>,

        /// Second participant's name
        #[arg(short = 'b', long)]
        wife_name: Option<String>,

        /// Couple photo (png, jpeg, gif, webp)
        #[arg(short, long)]
        photo: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Write the SVG instead of rasterizing to PNG
        #[arg(long)]
        svg: bool,

        /// Additional fields in format KEY=VALUE, e.g. registrar=李四 (can be used multiple times)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(RecordField, String)>,
    },

    /// Render certificates from a JSON array of records
    Batch {
        /// JSON file with records
        #[arg(short, long)]
        json: String,

        /// Template id used for every record (default from config)
        #[arg(short, long, value_parser = parse_template)]
        template: Option<TemplateId>,

        /// Photo used for every record
        #[arg(short, long)]
        photo: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Generate example JSON file
    Example {
        /// Output path for example JSON
        #[arg(short, long, default_value = "example.json")]
        output: String,

        /// Fill every field instead of just the names
        #[arg(short = 'x', long)]
        extended: bool,
    },

    /// List the available templates
    Templates,

    /// Interactively create a JSON file with certificate records
    CreateJson {
        /// Output path for JSON file
        #[arg(short, long, default_value = "paare.json")]
        output: String,
    },
}

fn parse_template(s: &str) -> Result<TemplateId, String> {
    s.parse::<TemplateId>().map_err(|e| e.to_string())
}

/// Parse a single key-value pair
fn parse_field(s: &str) -> Result<(RecordField, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    let field = s[..pos].parse::<RecordField>()?;
    Ok((field, s[pos + 1..].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("registrar=李四").unwrap(),
            (RecordField::Registrar, "李四".to_string())
        );
        assert_eq!(
            parse_field("husbandIdUrl=https://a.example/?x=1").unwrap(),
            (RecordField::HusbandIdUrl, "https://a.example/?x=1".to_string())
        );
        assert!(parse_field("registrar").is_err());
        assert!(parse_field("certificateNumber=1").is_err());
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from([
            "lovecert", "render", "-t", "vintage", "-a", "张小帅", "-b", "萌小美", "-f", "registrar=李四",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                template,
                husband_name,
                fields,
                svg,
                ..
            } => {
                assert_eq!(template, Some(TemplateId::Vintage));
                assert_eq!(husband_name.as_deref(), Some("张小帅"));
                assert_eq!(fields.len(), 1);
                assert!(!svg);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_template_is_optional() {
        let cli = Cli::try_parse_from(["lovecert", "batch", "-j", "paare.json"]).unwrap();
        match cli.command {
            Commands::Batch { template, .. } => assert_eq!(template, None),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_template_rejected() {
        assert!(Cli::try_parse_from(["lovecert", "render", "-t", "baroque"]).is_err());
    }
}
