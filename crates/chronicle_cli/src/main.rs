use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chronicle_cli::{build_info_fields, check_templates, generate, GenerateInput};
use chronicle_core::BuildInfo;

#[derive(Parser)]
#[command(
    name = "chronicle",
    version,
    about = "Yearly archive generator: merges dated fragments into one document per year"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Generate(GenerateArgs),
    Check(CheckArgs),
    Info(InfoArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Fragment corpus root directory
    #[arg(short, long, value_name = "DIR", default_value = "input")]
    input: PathBuf,

    /// Template directory (omit to skip boilerplate synthesis)
    #[arg(short, long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Output root directory
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output: PathBuf,

    /// Remove the output directory before generating
    #[arg(long)]
    clean: bool,

    /// Do not invoke the external PDF renderer
    #[arg(long)]
    skip_pdf: bool,

    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Template directory to verify
    #[arg(short, long, value_name = "DIR", required = true)]
    templates: PathBuf,
}

#[derive(Parser)]
struct InfoArgs {
    /// Output JSON instead of key=value lines
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Check(args) => run_check(args),
        Commands::Info(args) => run_info(args),
    };
    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let out = generate(&GenerateInput {
        input: args.input,
        templates: args.templates,
        output: args.output,
        clean: args.clean,
        skip_pdf: args.skip_pdf,
    })
    .map_err(|err| err.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&out).map_err(|err| format!("json encode: {}", err))?;
        println!("{}", json);
        return Ok(());
    }

    println!("fragments_loaded={}", out.fragments_loaded);
    println!("fragments_synthesized={}", out.fragments_synthesized);
    println!("years={}", out.years.len());
    for year in &out.years {
        println!(
            "year={} sources={} html={} sha256={}",
            year.year, year.source_count, year.html_path, year.html_sha256
        );
        if let Some(pdf) = year.pdf_path.as_ref() {
            println!("year={} pdf={}", year.year, pdf);
        }
        println!("year={} deps={}", year.year, year.manifest_path);
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    check_templates(&args.templates).map_err(|err| err.to_string())?;
    println!("templates_ok={}", args.templates.display());
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<(), String> {
    let info = BuildInfo::from_env();
    let fields = build_info_fields(&info);
    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .map(|(label, value)| (label.to_string(), serde_json::Value::String(value)))
            .collect();
        let json = serde_json::to_string_pretty(&serde_json::Value::Object(map))
            .map_err(|err| format!("json encode: {}", err))?;
        println!("{}", json);
        return Ok(());
    }
    for (label, value) in fields {
        println!("{}={}", label, value);
    }
    Ok(())
}
