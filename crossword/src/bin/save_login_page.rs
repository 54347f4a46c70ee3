use anyhow::{Context, Result};
use clap::Parser;
use daily_crossword::auth::{HtmlExtractor, LoginFieldExtractor, RegexExtractor};
use daily_crossword::config::DEFAULT_LOGIN_URL;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;

/// Save the login page for regression testing and check that the login
/// fields can still be read from it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name for the saved page
    test_name: String,

    /// Login page to fetch
    #[arg(long, default_value = DEFAULT_LOGIN_URL)]
    url: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Fetching HTML from {}...", args.url);

    let client = Client::new();
    let response = client
        .get(&args.url)
        .send()
        .context("Failed to send request")?;
    let html = response.text().context("Failed to get response text")?;

    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", args.test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nAttempting to extract the login fields:");
    let extractors: [(&str, Box<dyn LoginFieldExtractor>); 2] = [
        ("regex", Box::new(RegexExtractor::new())),
        ("html", Box::new(HtmlExtractor::new())),
    ];
    for (name, extractor) in &extractors {
        match extractor.extract_login_fields(&html) {
            Ok(fields) => println!(
                "  - {}: token {}, expires {}",
                name,
                fields.token,
                fields.expires.as_deref().unwrap_or("<none>")
            ),
            Err(e) => println!("  - {}: {}", name, e),
        }
    }

    Ok(())
}
