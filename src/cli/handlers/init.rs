use crate::config::{CONFIG_FILE, DemoConfig, SeedData};
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(sample: bool, force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    let config = DemoConfig {
        seed: if sample {
            SeedData::sample()
        } else {
            SeedData::default()
        },
        ..DemoConfig::default()
    };
    config.save(&config_path)?;

    println!("{} {}", "Initialized".green(), config_path.display());
    if sample {
        println!(
            "  Seed:   {} books, {} authors, {} persons",
            config.seed.books.len(),
            config.seed.authors.len(),
            config.seed.persons.len()
        );
    }

    Ok(())
}
