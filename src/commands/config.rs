use anyhow::Result;
use eventboard_core::config::BoardConfig;
use owo_colors::OwoColorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    println!("{} {}", "Config file:".dimmed(), BoardConfig::config_path()?.display());
    println!("{} {}", "Data dir:   ".dimmed(), config.data_path().display());
    println!("{} {}", "Timezone:   ".dimmed(), config.timezone());
    println!("{} {}", "Overlaps:   ".dimmed(), config.overlap_policy);
    println!("{} {}", "Page size:  ".dimmed(), config.page_size);

    Ok(())
}
