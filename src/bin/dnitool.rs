use clap::{Parser, Subcommand};
use dni_verify::decoder::CancelFlag;
use dni_verify::preprocess::preprocess;
use dni_verify::tools::{load_image, save_gray};
use dni_verify::{
    ParsedIdentityRecord, PipelineConfig, RxingReaderFactory, UserSuppliedRecord, ValidationResult,
    VerifyError,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dnitool", version, about = "DNI barcode scanning and verification tools")]
struct Cli {
    /// Widest preprocessed image, overrides DNI_MAX_WIDTH
    #[arg(long, global = true)]
    max_width: Option<usize>,
    /// Contrast push, overrides DNI_CONTRAST_DELTA
    #[arg(long, global = true)]
    contrast: Option<u8>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode and parse the barcode on a front photo
    Scan {
        #[arg(long)]
        front: PathBuf,
    },
    /// Verify typed fields against a front photo, printing JSON
    Verify {
        #[arg(long)]
        front: PathBuf,
        #[arg(long)]
        back: Option<PathBuf>,
        #[arg(long)]
        last_names: String,
        #[arg(long)]
        first_names: String,
        #[arg(long)]
        sex: String,
        #[arg(long)]
        document: String,
        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: String,
    },
    /// Write the preprocessed variant of a photo for inspection
    Preprocess {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();
    if let Some(max_width) = cli.max_width {
        config = config.with_max_width(max_width);
    }
    if let Some(delta) = cli.contrast {
        config = config.with_contrast_delta(delta);
    }

    let result = match cli.command {
        Command::Scan { front } => scan_cmd(&front, &config),
        Command::Verify {
            front,
            back,
            last_names,
            first_names,
            sex,
            document,
            birth_date,
        } => {
            let user = UserSuppliedRecord {
                last_names,
                first_names,
                sex,
                document_number: document,
                birth_date_iso: birth_date,
            };
            verify_cmd(&front, back.as_deref(), &user, &config)
        }
        Command::Preprocess { input, output } => preprocess_cmd(&input, &output, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if let CliError::Verify(e) = &err {
                eprintln!("{}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

/// JSON printed by `verify`
#[derive(Serialize)]
struct VerifyReport<'a> {
    record: &'a ParsedIdentityRecord,
    validation: &'a ValidationResult,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error(transparent)]
    Image(#[from] dni_verify::ImageDecodeError),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

fn scan_cmd(front: &Path, config: &PipelineConfig) -> Result<(), CliError> {
    let image = load_image(front)?;
    let start = Instant::now();
    let (record, attempt, report) =
        dni_verify::scan_front(&image, config, &CancelFlag::new(), &RxingReaderFactory)?;

    println!("Image: {} ({}x{})", front.display(), image.width(), image.height());
    println!(
        "Decoded on attempt {}/{} (config={}, variant={:?}, angle={}) in {:.1}ms",
        attempt.index + 1,
        report.attempt_count(),
        attempt.config,
        attempt.variant,
        attempt.angle,
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("  Apellidos:           {}", record.last_names());
    println!("  Nombres:             {}", record.first_names());
    println!("  Sexo:                {}", record.sex());
    println!("  Número de documento: {}", record.document_number());
    println!("  Fecha de nacimiento: {}", record.birth_date_iso());
    Ok(())
}

fn verify_cmd(
    front: &Path,
    back: Option<&Path>,
    user: &UserSuppliedRecord,
    config: &PipelineConfig,
) -> Result<(), CliError> {
    let front_image = load_image(front)?;
    let back_image = back.map(load_image).transpose()?;
    let outcome = dni_verify::verify_identity(
        &front_image,
        back_image.as_ref(),
        user,
        config,
        &CancelFlag::new(),
    )?;
    let report = VerifyReport {
        record: &outcome.record,
        validation: &outcome.validation,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn preprocess_cmd(input: &Path, output: &Path, config: &PipelineConfig) -> Result<(), CliError> {
    let image = load_image(input)?;
    let processed = preprocess(&image, config)?;
    save_gray(&processed, output)?;
    println!(
        "{} ({}x{}) -> {} ({}x{})",
        input.display(),
        image.width(),
        image.height(),
        output.display(),
        processed.width(),
        processed.height()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dni_verify::payload::parse_payload;
    use dni_verify::validate::validate;

    #[test]
    fn test_verify_report_has_record_and_validation_only() {
        let record = parse_payload("X@LAST@FIRST@M@12345678@X@01/02/1990@X@X").unwrap();
        let user = UserSuppliedRecord {
            last_names: "Last".to_string(),
            first_names: "First".to_string(),
            sex: "F".to_string(),
            document_number: "12345678".to_string(),
            birth_date_iso: "1990-02-01".to_string(),
        };
        let validation = validate(&record, &user);
        let report = VerifyReport {
            record: &record,
            validation: &validation,
        };

        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["record", "validation"]);
        assert_eq!(json["validation"]["ok"], false);
        assert_eq!(json["validation"]["mismatches"][0], "Sexo");
    }
}
