/// Tree rendering for diagnostics
use super::ancestry::{AncestryIndex, NestedBounds};
use super::table::{TaxonRecord, TaxonTable};
use cladis_core::{LookupError, TaxonId, TreeOrder};
use std::cmp::Ordering;

/// Trait for turning a taxon into the text shown on its tree line
pub trait TaxonFormatter {
    fn label(&self, record: &TaxonRecord, bounds: NestedBounds) -> String;
}

/// `name :: left:right`, or just the name with bounds hidden
pub struct StandardTaxonFormatter {
    pub show_bounds: bool,
}

impl TaxonFormatter for StandardTaxonFormatter {
    fn label(&self, record: &TaxonRecord, bounds: NestedBounds) -> String {
        if self.show_bounds {
            format!("{} :: {}:{}", record.name, bounds.left, bounds.right)
        } else {
            record.name.clone()
        }
    }
}

impl<F> TaxonFormatter for F
where
    F: Fn(&TaxonRecord, NestedBounds) -> String,
{
    fn label(&self, record: &TaxonRecord, bounds: NestedBounds) -> String {
        self(record, bounds)
    }
}

#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub order: TreeOrder,
    pub max_depth: Option<usize>,
    pub show_bounds: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            order: TreeOrder::Auto,
            max_depth: None,
            show_bounds: true,
        }
    }
}

fn by_score_desc(a: &TaxonRecord, b: &TaxonRecord) -> Ordering {
    match (a.display_score, b.display_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order siblings for display. Sorting is stable, so ties keep table order.
fn order_children<'t>(children: &mut [&'t TaxonRecord], order: TreeOrder) {
    match order {
        TreeOrder::Source => {}
        TreeOrder::Name => children.sort_by(|a, b| a.name.cmp(&b.name)),
        TreeOrder::Score => children.sort_by(|a, b| by_score_desc(a, b)),
        TreeOrder::Auto => {
            if children.iter().any(|c| c.display_score.is_some()) {
                children.sort_by(|a, b| by_score_desc(a, b));
            } else {
                children.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }
}

struct TreeWriter<'a, L: TaxonFormatter> {
    table: &'a TaxonTable,
    ancestry: &'a AncestryIndex,
    options: &'a TreeOptions,
    formatter: &'a L,
    out: String,
}

impl<'a, L: TaxonFormatter> TreeWriter<'a, L> {
    fn record(&self, taxon_id: TaxonId) -> Result<&'a TaxonRecord, LookupError> {
        self.table
            .get(taxon_id)
            .ok_or(LookupError::UnknownTaxon(taxon_id))
    }

    fn write_children(
        &mut self,
        parent: TaxonId,
        prefix: &str,
        depth: usize,
    ) -> Result<(), LookupError> {
        let mut children = self
            .ancestry
            .children_of(parent)?
            .iter()
            .map(|&id| self.record(id))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(max) = self.options.max_depth {
            if depth > max {
                if !children.is_empty() {
                    self.out
                        .push_str(&format!("{}... ({} children)\n", prefix, children.len()));
                }
                return Ok(());
            }
        }

        order_children(&mut children, self.options.order);

        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            let bounds = self.ancestry.bounds(child.taxon_id)?;

            self.out.push_str(prefix);
            self.out.push_str(if is_last { "└── " } else { "├── " });
            self.out.push_str(&self.formatter.label(child, bounds));
            self.out.push('\n');

            // Bounds one apart mean nothing below
            if !bounds.is_leaf() {
                let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                self.write_children(child.taxon_id, &child_prefix, depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Render the subtree under `root` (the whole forest when `None`) using the
/// standard label
pub fn render_tree(
    table: &TaxonTable,
    ancestry: &AncestryIndex,
    root: Option<TaxonId>,
    options: &TreeOptions,
) -> Result<String, LookupError> {
    let formatter = StandardTaxonFormatter {
        show_bounds: options.show_bounds,
    };
    render_tree_with(table, ancestry, root, options, &formatter)
}

/// Render with a caller-supplied label
pub fn render_tree_with<L: TaxonFormatter>(
    table: &TaxonTable,
    ancestry: &AncestryIndex,
    root: Option<TaxonId>,
    options: &TreeOptions,
    formatter: &L,
) -> Result<String, LookupError> {
    let mut writer = TreeWriter {
        table,
        ancestry,
        options,
        formatter,
        out: String::new(),
    };

    match root.filter(|r| !r.is_root()) {
        Some(taxon_id) => {
            let record = writer.record(taxon_id)?;
            let bounds = ancestry.bounds(taxon_id)?;
            writer.out.push_str(&formatter.label(record, bounds));
            writer.out.push('\n');
            if !bounds.is_leaf() {
                writer.write_children(taxon_id, "", 1)?;
            }
        }
        None => writer.write_children(TaxonId::ROOT, "", 1)?,
    }

    Ok(writer.out)
}
