use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use image::DynamicImage;
use log::debug;

use fullcard_pdf::{CardError, Catalog, FullCard, Member, Preferences, MANIFEST};

// ============================================================================
// CLI Arguments
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate the printable full member card (adhesion form) as PDF"
)]
struct Args {
    /// Member profile JSON export; omit to print a blank card
    #[arg(short, long)]
    member: Option<PathBuf>,

    /// Association preferences JSON (display name, postal address)
    #[arg(short, long, required_unless_present = "manifest")]
    prefs: Option<PathBuf>,

    /// Translation catalog JSON (source string -> translated string)
    #[arg(short, long)]
    translations: Option<PathBuf>,

    /// Logo image (file path or URL) to display in the page header
    #[arg(long)]
    logo: Option<String>,

    /// Output filename (defaults to the translated card token)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the plugin manifest as JSON and exit
    #[arg(long)]
    manifest: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CardError> {
    let args = Args::parse();

    if args.manifest {
        println!("{}", serde_json::to_string_pretty(&MANIFEST)?);
        return Ok(());
    }

    let Some(prefs_path) = args.prefs.as_deref() else {
        return Err(CardError::MissingArgument("--prefs"));
    };

    // Load inputs
    let preferences = Preferences::from_path(prefs_path)?;
    let member = match &args.member {
        Some(path) => Some(Member::from_path(path)?),
        None => None,
    };
    let catalog = match &args.translations {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::default(),
    };
    let logo = load_logo(&args.logo)?;
    debug!(
        "inputs loaded (member: {}, translations: {}, logo: {})",
        member.is_some(),
        args.translations.is_some(),
        logo.is_some()
    );

    // Build the card
    let mut card = FullCard::new(member.as_ref(), &preferences, &catalog);
    if let Some(ref logo) = logo {
        card = card.with_logo(logo);
    }

    // Determine output filename
    let output_file = args
        .output
        .unwrap_or_else(|| PathBuf::from(card.filename()));

    // Render and write
    let bytes = card.render()?;
    std::fs::write(&output_file, &bytes)?;

    println!("✓ Generated: {}", output_file.display());
    match &member {
        Some(m) => println!(
            "  Member: {} {}",
            m.surname.as_deref().unwrap_or(""),
            m.name.as_deref().unwrap_or("")
        ),
        None => println!("  Blank template"),
    }
    println!("  Association: {}", preferences.name);

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn load_logo(path: &Option<String>) -> Result<Option<DynamicImage>, CardError> {
    match path {
        Some(p) => {
            let image_bytes = if p.starts_with("http://") || p.starts_with("https://") {
                // Load from URL
                let response = ureq::get(p)
                    .call()
                    .map_err(|e| CardError::Logo(format!("Failed to fetch URL: {}", e)))?;

                let mut bytes = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut bytes)
                    .map_err(|e| CardError::Logo(format!("Failed to read response: {}", e)))?;
                bytes
            } else {
                // Load from file
                std::fs::read(p).map_err(|e| CardError::Logo(format!("{}: {}", p, e)))?
            };

            let img = image::load_from_memory(&image_bytes)
                .map_err(|e| CardError::Logo(format!("Failed to decode image: {}", e)))?;

            Ok(Some(img))
        }
        None => Ok(None),
    }
}
