use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use humanize_kit::{
    cli::{Cli, OutputFormat},
    paraphrase::Style,
    HumanizeReport, ParaphraseConfig, Paraphraser,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let config = cli.load_config()?;
    let input = cli.read_input()?;

    let style = cli.resolve_style(&config);

    let (output, style) = match cli.read_comparison()? {
        Some(existing) => {
            tracing::debug!("Comparing input against an existing rewrite");
            (existing, None)
        }
        None => (rewrite(&config.paraphrase, style, cli.seed, &input), Some(style)),
    };

    let report = HumanizeReport::new(&input, &output, style);

    match cli.output {
        OutputFormat::Text => println!("{}", report.render_text(!cli.no_color)),
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Compact => println!("{}", report.output),
    }

    Ok(())
}

fn rewrite(config: &ParaphraseConfig, tag: &str, seed: Option<u64>, input: &str) -> String {
    let paraphraser = Paraphraser::with_config(config.clone());

    let Some(style) = Style::parse(tag) else {
        tracing::warn!("Unknown style {:?}, output will match the input", tag);
        return input.to_string();
    };

    tracing::info!("Rewriting {} characters in {} style", input.chars().count(), style);

    match seed {
        Some(seed) => paraphraser.paraphrase_with_rng(input, style, &mut StdRng::seed_from_u64(seed)),
        None => paraphraser.paraphrase(input, style),
    }
}
