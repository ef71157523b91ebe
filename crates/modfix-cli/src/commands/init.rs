use anyhow::Result;
use modfix_config::{CONFIG_FILE, ProjectConfig};

pub fn handle() -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config_path = current_dir.join(CONFIG_FILE);

    if config_path.exists() {
        anyhow::bail!("{} already exists in current directory", CONFIG_FILE);
    }

    let config = ProjectConfig::default();
    config.save(&current_dir)?;

    println!("✓ Created {}", CONFIG_FILE);
    println!("  Target: {}", config.target.dir.display());
    println!("  Run 'modfix check' to preview changes");

    Ok(())
}
