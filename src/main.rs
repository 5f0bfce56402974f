use clap::Parser;
use lovecert::export::{export_filename, DirectorySink, ResvgCapture};
use lovecert::session::GENERATION_DELAY;
use lovecert::{
    AppConfig, CertificateRecord, Cli, Commands, ExportOutcome, ExportPipeline, LovecertError,
    RecordField, Result, Session, TemplateId, TEMPLATES,
};
use log::{error, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(e) = run() {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging initialisieren
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            template,
            json,
            husband_name,
            wife_name,
            photo,
            output_dir,
            svg,
            fields,
        } => {
            info!("Rendering single certificate");
            let mut session = Session::new(&config);

            if let Some(path) = json {
                load_json_record(&mut session, &path)?;
            }
            if let Some(name) = husband_name {
                session.set_field(RecordField::HusbandName, name);
            }
            if let Some(name) = wife_name {
                session.set_field(RecordField::WifeName, name);
            }
            for (field, value) in fields {
                info!("Setting field: {} = {}", field, value);
                session.set_field(field, value);
            }

            let template = template.unwrap_or(config.template);
            prepare_preview(&mut session, template, photo.as_deref())?;
            let path = if svg {
                write_svg(&session, &config, &output_dir)?
            } else {
                export_png(&mut session, &ExportPipeline::to_directory(&config, &output_dir))?
            };
            println!("✓ Certificate created: {}", path.display());
        }

        Commands::Batch {
            json,
            template,
            photo,
            output_dir,
        } => {
            info!("Starting batch processing");
            let template = template.unwrap_or(config.template);
            let count = render_batch(&config, &json, template, photo.as_deref(), &output_dir)?;
            println!("✓ Created {} certificates in {}", count, output_dir.display());
        }

        Commands::Example { output, extended } => {
            info!("Generating example JSON");
            generate_example(&output, extended)?;
            println!("✓ Example file created: {}", output);
        }

        Commands::Templates => {
            for template in &TEMPLATES {
                println!(
                    "{:<12} {}  {}  ({})",
                    template.id, template.name, template.description, template.preview_image
                );
            }
        }

        Commands::CreateJson { output } => {
            lovecert::interactive::create_json_interactive(&output)?;
        }
    }

    Ok(())
}

/// Datensatz aus einer JSON-Datei übernehmen
fn load_json_record(session: &mut Session, path: &str) -> Result<()> {
    let record = CertificateRecord::from_json_file(path, session.today())?;
    info!("Loaded record for {} & {}", record.husband_name(), record.wife_name());
    session.load_record(record);
    Ok(())
}

/// Vorlage wählen, Foto laden und die Vorschau erzeugen
fn prepare_preview(
    session: &mut Session,
    template: TemplateId,
    photo: Option<&Path>,
) -> Result<()> {
    session.select_template(template.as_str())?;
    if let Some(photo) = photo {
        session.upload_photo_file(photo)?;
    }

    // Die Vorschau erscheint erst nach der Erzeugung
    session.generate();
    session.tick(GENERATION_DELAY);
    Ok(())
}

fn export_png(
    session: &mut Session,
    pipeline: &ExportPipeline<ResvgCapture, DirectorySink>,
) -> Result<PathBuf> {
    match session.download(pipeline)? {
        ExportOutcome::Saved { path, .. } => Ok(path),
        other => Err(LovecertError::Capture(format!("export did not run: {:?}", other))),
    }
}

fn write_svg(session: &Session, config: &AppConfig, output_dir: &Path) -> Result<PathBuf> {
    let record = session.record();
    let filename = export_filename(
        &config.filename_prefix,
        record.husband_name(),
        record.wife_name(),
        chrono::Utc::now().timestamp_millis(),
    );
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(Path::new(&filename).with_extension("svg"));
    std::fs::write(&path, session.render().to_svg(&config.font_family))?;
    Ok(path)
}

fn render_batch(
    config: &AppConfig,
    json_path: &str,
    template: TemplateId,
    photo: Option<&Path>,
    output_dir: &Path,
) -> Result<usize> {
    // Ganze Datei als Value lesen, damit die erzeugten Dateinamen zurückgeschrieben werden können
    let content = std::fs::read_to_string(json_path)?;
    let mut v: Value = serde_json::from_str(&content)?;

    let arr = match v.as_array_mut() {
        Some(a) => a,
        None => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Expected top-level JSON array in batch file",
            )
            .into())
        }
    };

    let pipeline = ExportPipeline::to_directory(config, output_dir);
    let mut created = 0usize;

    for (idx, item) in arr.iter_mut().enumerate() {
        let record: CertificateRecord = serde_json::from_value(item.clone())?;

        let mut session = Session::new(config);
        session.load_record(record);
        prepare_preview(&mut session, template, photo)?;
        let path = export_png(&mut session, &pipeline)?;

        if let Value::Object(map) = item {
            map.insert(
                "generatedFile".to_string(),
                Value::String(path.to_string_lossy().to_string()),
            );
        }

        created += 1;
        info!("Created [{}] -> {}", idx, path.display());
    }

    let pretty = serde_json::to_string_pretty(&v)?;
    std::fs::write(json_path, pretty)?;

    Ok(created)
}

fn generate_example(output: &str, extended: bool) -> Result<()> {
    let examples = if extended {
        serde_json::json!([
            {
                "husbandName": "张小帅",
                "wifeName": "萌小美",
                "husbandGender": "男",
                "wifeGender": "女",
                "husbandRegistrationPlace": "北京市朝阳区",
                "wifeRegistrationPlace": "上海市浦东新区",
                "husbandBirthDate": "1995-03-14",
                "wifeBirthDate": "1996-11-02",
                "registrationDate": "2024-05-20",
                "registrar": "李登记",
                "husbandIdNumber": "110101199503140011",
                "wifeIdNumber": "310115199611020022",
                "husbandIdUrl": "https://www.gov.cn",
                "wifeIdUrl": "https://www.gov.cn"
            },
            {
                "husbandName": "王大锤",
                "wifeName": "林小鹿",
                "registrationDate": "2025-02-14",
                "registrar": "赵登记"
            }
        ])
    } else {
        serde_json::json!([
            { "husbandName": "张小帅", "wifeName": "萌小美" },
            { "husbandName": "王大锤", "wifeName": "林小鹿" }
        ])
    };

    let json = serde_json::to_string_pretty(&examples)?;
    std::fs::write(output, json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> AppConfig {
        AppConfig {
            scale: 0.25,
            load_system_fonts: false,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_example_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.json");
        generate_example(path.to_str().unwrap(), true).unwrap();

        let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut records: Vec<CertificateRecord> = serde_json::from_str(&content).unwrap();
        for record in &mut records {
            record.refresh_number(today);
        }
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].certificate_number(), "520405-2024-052020405");
        assert_eq!(records[1].get(RecordField::HusbandGender), "男");
    }

    #[test]
    fn test_batch_writes_generated_files_back() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("paare.json");
        generate_example(json.to_str().unwrap(), false).unwrap();
        let out = dir.path().join("out");

        let count =
            render_batch(&quick_config(), json.to_str().unwrap(), TemplateId::Modern, None, &out)
                .unwrap();
        assert_eq!(count, 2);

        let v: Value = serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        for item in v.as_array().unwrap() {
            let generated = item["generatedFile"].as_str().unwrap();
            assert!(Path::new(generated).exists(), "{}", generated);
        }
    }

    #[test]
    fn test_render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let config = quick_config();
        let mut session = Session::new(&config);
        session.set_field(RecordField::HusbandName, "A");
        session.set_field(RecordField::WifeName, "B");

        prepare_preview(&mut session, TemplateId::Elegant, None).unwrap();
        let path = write_svg(&session, &config, dir.path()).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Marriage"));
    }

    #[test]
    fn test_render_json_record() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("paar.json");
        let content = r#"{ "husbandName": "张小帅", "wifeName": "萌小美", "registrar": "李登记" }"#;
        std::fs::write(&json, content).unwrap();

        let config = quick_config();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let mut session = Session::new(&config).with_today(move || today);
        load_json_record(&mut session, json.to_str().unwrap()).unwrap();
        assert_eq!(session.record().certificate_number(), "520405-2024-052020405");

        prepare_preview(&mut session, TemplateId::Vintage, None).unwrap();
        let path = write_svg(&session, &config, dir.path()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("李登记"));
        assert!(svg.contains("520405-2024-052020405"));

        assert!(load_json_record(&mut session, "fehlt.json").is_err());
    }

    #[test]
    fn test_batch_requires_array() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("single.json");
        std::fs::write(&json, r#"{ "husbandName": "A" }"#).unwrap();
        let result = render_batch(
            &quick_config(),
            json.to_str().unwrap(),
            TemplateId::Traditional,
            None,
            dir.path(),
        );
        assert!(result.is_err());
    }
}
