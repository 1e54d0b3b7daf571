//! gazette - bilingual newsletter builder

use std::process::ExitCode;

use clap::Parser;

use gazette::render::{DEFAULT_FULL_EDITION_URL, DEFAULT_READ_MORE_LABEL};
use gazette::{Language, ReadMoreLink, RenderMode, SectionPolicy};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(version, about = "Bilingual HTML newsletter builder", long_about = None)]
#[command(after_help = "EXAMPLES:
    gazette content.json -t web.html -o index.html            Build the web edition
    gazette content.json -t email.html -o email.html --email  Build the email edition
    gazette content.json --info                               Show edition summary")]
struct Cli {
    /// Content document (JSON)
    #[arg(value_name = "CONTENT")]
    content: String,

    /// HTML template with {{PLACEHOLDER}} tokens
    #[arg(short, long, value_name = "FILE", required_unless_present = "info")]
    template: Option<String>,

    /// Where to write the newsletter
    #[arg(short, long, value_name = "FILE", required_unless_present = "info")]
    output: Option<String>,

    /// Build the abbreviated email edition (first section only, CSS inlined)
    #[arg(short, long)]
    email: bool,

    /// Address of the hosted full edition, linked from the email edition
    #[arg(long, value_name = "URL", env = "GAZETTE_WEB_URL", default_value = DEFAULT_FULL_EDITION_URL)]
    web_url: String,

    /// Label of the read-more link in the email edition
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_READ_MORE_LABEL)]
    read_more_label: String,

    /// Leave out sections that fail to render instead of aborting
    #[arg(long)]
    skip_invalid_sections: bool,

    /// Show edition metadata and sections without building
    #[arg(short, long)]
    info: bool,

    /// Log progress (RUST_LOG overrides)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = if cli.info {
        show_info(&cli.content)
    } else {
        build(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn show_info(path: &str) -> Result<(), String> {
    let doc = gazette::load_document(path).map_err(|e| e.to_string())?;

    println!("Title:    {}", doc.meta.title);
    if !doc.meta.date.is_empty() {
        println!("Date:     {}", doc.meta.date);
    }
    if !doc.meta.edition.is_empty() {
        println!("Edition:  {}", doc.meta.edition);
    }

    for language in Language::ALL {
        match doc.track(language) {
            Some(track) => {
                println!("{}: {} sections", language.name(), track.len());
                for section in &track.sections {
                    println!(
                        "  - {:<18} {}",
                        section.section_type,
                        section.title().unwrap_or("")
                    );
                }
            }
            None => println!("{}: (missing)", language.name()),
        }
    }

    Ok(())
}

fn build(cli: &Cli) -> Result<(), String> {
    let (Some(template), Some(output)) = (&cli.template, &cli.output) else {
        return Err("--template and --output are required".to_string());
    };

    let mode = if cli.email {
        RenderMode::Abbreviated(
            ReadMoreLink::new(cli.web_url.as_str()).with_label(cli.read_more_label.as_str()),
        )
    } else {
        RenderMode::Full
    };
    let policy = if cli.skip_invalid_sections {
        SectionPolicy::Skip
    } else {
        SectionPolicy::Abort
    };

    let report = gazette::build(&cli.content, template, output, &mode, policy)
        .map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!("{} -> {} ({} bytes)", cli.content, output, report.bytes_written);
    }

    Ok(())
}
