use crate::cli::output::*;
use crate::cli::settings::Settings;
use anyhow::Result;
use clap::Args;
use cladis_core::{CladisError, TaxonId};
use cladis_taxonomy::{read_score_vector, top_k};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct FilterArgs {
    /// JSON array with one score per model output position
    #[arg(long, value_name = "JSON")]
    pub scores: PathBuf,

    /// Keep only this taxon and its descendants
    #[arg(long, value_name = "TAXON_ID")]
    pub taxon: Option<u32>,

    /// Number of results to show (defaults to prediction.top_k)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ScoredTaxon<'a> {
    taxon_id: TaxonId,
    name: &'a str,
    score: f32,
}

pub fn run(args: FilterArgs, settings: &Settings) -> Result<()> {
    let model = settings.load_model()?;
    let scores = read_score_vector(&args.scores)?;

    let filter_taxon = args.taxon.map(TaxonId::new);
    let results = model
        .filter()
        .apply(&scores, filter_taxon)
        .map_err(CladisError::from)?;

    let k = args.top.unwrap_or(settings.config.prediction.top_k);
    let ranked = top_k(&results, k);

    let rows: Vec<ScoredTaxon> = ranked
        .iter()
        .map(|&(taxon_id, score)| ScoredTaxon {
            taxon_id,
            name: model
                .taxon(taxon_id)
                .map(|record| record.name.as_str())
                .unwrap_or(""),
            score,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        empty("no scored taxa under this filter");
        return Ok(());
    }

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Taxon"),
        header_cell("Name"),
        header_cell("Score"),
    ]);
    for row in &rows {
        table.add_row(vec![
            row.taxon_id.to_string(),
            row.name.to_string(),
            format!("{:.4}", row.score),
        ]);
    }
    println!("{}", table);

    if results.len() > rows.len() {
        println!("{} of {} scored taxa shown", rows.len(), results.len());
    }

    Ok(())
}
