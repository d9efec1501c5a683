use crate::cli::output::*;
use crate::cli::settings::Settings;
use anyhow::Result;
use clap::Args;
use cladis_taxonomy::TaxonomySummary;

#[derive(Args)]
pub struct CheckArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs, settings: &Settings) -> Result<()> {
    let model = settings.load_model()?;
    let summary = TaxonomySummary::from_model(&model);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    success(&format!(
        "Taxonomy index built: {} taxa",
        format_number(summary.taxa)
    ));
    tree_section(
        "Summary",
        &[
            ("Root-level taxa", format_number(summary.root_level_taxa)),
            ("Internal taxa", format_number(summary.internal_taxa)),
            ("Leaf classes", format_number(summary.leaf_classes)),
            ("Output width", format_number(summary.output_width)),
            ("Thresholds", format_number(summary.thresholds)),
            ("Max depth", summary.max_depth.to_string()),
        ],
    );

    if summary.leaf_classes < summary.output_width {
        warning(&format!(
            "{} output positions have no taxon and will be skipped",
            summary.output_width - summary.leaf_classes
        ));
    }

    if !summary.rank_counts.is_empty() {
        section_header("Ranks");
        let mut table = create_standard_table();
        table.set_header(vec![header_cell("Rank"), header_cell("Taxa")]);
        for (rank, count) in &summary.rank_counts {
            table.add_row(vec![rank.clone(), format_number(*count)]);
        }
        println!("{}", table);
    }

    Ok(())
}
