use crate::cli::output::*;
use crate::cli::settings::Settings;
use anyhow::Result;
use clap::Args;
use cladis_core::{CladisError, TaxonId};
use cladis_taxonomy::ModelTaxonomy;

#[derive(Args)]
pub struct InfoArgs {
    /// Taxon to describe
    #[arg(value_name = "TAXON_ID")]
    pub taxon_id: u32,
}

fn describe(model: &ModelTaxonomy, taxon_id: TaxonId) -> String {
    match model.taxon(taxon_id) {
        Ok(record) => format!("{} ({})", record.name, taxon_id),
        Err(_) => taxon_id.to_string(),
    }
}

pub fn run(args: InfoArgs, settings: &Settings) -> Result<()> {
    let model = settings.load_model()?;
    let taxon_id = TaxonId::new(args.taxon_id);

    let record = model.taxon(taxon_id).map_err(CladisError::from)?;
    let ancestry = model.ancestry();
    let bounds = ancestry.bounds(taxon_id).map_err(CladisError::from)?;

    tree_section(
        &format!("{} ({})", record.name, taxon_id),
        &[
            ("Rank", format_optional(record.rank.as_deref())),
            ("Parent", describe_parent(&model, taxon_id)?),
            ("Bounds", format!("{}:{}", bounds.left, bounds.right)),
            ("Descendants", format_number(bounds.descendant_count())),
            ("Leaf class", format_optional(record.leaf_class_id)),
            ("Threshold", format_optional(model.threshold_for(taxon_id))),
            ("Display score", format_optional(record.display_score)),
        ],
    );

    section_header("Lineage");
    let chain = ancestry.ancestors_of(taxon_id).map_err(CladisError::from)?;
    if chain.is_empty() {
        empty("root-level taxon");
    } else {
        let names: Vec<String> = chain.iter().map(|&id| describe(&model, id)).collect();
        println!("{}", names.join(" > "));
    }

    section_header("Children");
    let children = ancestry.children_of(taxon_id).map_err(CladisError::from)?;
    if children.is_empty() {
        empty("none");
    }
    for &child in children {
        println!("  {}", describe(&model, child));
    }

    Ok(())
}

fn describe_parent(model: &ModelTaxonomy, taxon_id: TaxonId) -> Result<String, CladisError> {
    let parent = model.ancestry().parent_of(taxon_id)?;
    Ok(if parent.is_root() {
        "root".to_string()
    } else {
        describe(model, parent)
    })
}
