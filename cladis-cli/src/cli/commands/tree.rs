use crate::cli::settings::Settings;
use anyhow::Result;
use clap::Args;
use cladis_core::{CladisError, TaxonId, TreeOrder};
use cladis_taxonomy::TreeOptions;

#[derive(Args)]
pub struct TreeArgs {
    /// Only print the subtree under this taxon
    #[arg(long, value_name = "TAXON_ID")]
    pub root: Option<u32>,

    /// Child order: auto, source, name or score
    #[arg(long)]
    pub order: Option<TreeOrder>,

    /// Stop descending below this depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Print names only, without nested-set bounds
    #[arg(long)]
    pub no_bounds: bool,
}

pub fn run(args: TreeArgs, settings: &Settings) -> Result<()> {
    let model = settings.load_model()?;
    let display = &settings.config.display;

    let options = TreeOptions {
        order: args.order.unwrap_or(display.order),
        max_depth: args.max_depth.or(display.max_depth),
        show_bounds: display.show_bounds && !args.no_bounds,
    };

    let root = args.root.map(TaxonId::new);
    let rendered = model
        .render_tree(root, &options)
        .map_err(CladisError::from)?;
    print!("{}", rendered);

    Ok(())
}
