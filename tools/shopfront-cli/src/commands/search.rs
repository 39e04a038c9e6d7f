//! Catalog search command.

use anyhow::{anyhow, Result};
use shopfront_commerce::search::{Filter, SearchQuery, SortOption};
use shopfront_commerce::Money;

use super::catalog::print_product_table;
use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&args)?;
    let results = query.run(catalog.products());

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    let title = match &query.query {
        Some(text) => format!("Resultados para \"{}\"", text),
        None => "Produtos".to_string(),
    };
    ctx.output.header(&title);
    print_product_table(&results.items, ctx);

    let pagination = &results.pagination;
    if pagination.total > 0 {
        ctx.output.line("");
        ctx.output.info(&format!(
            "Mostrando {}-{} de {} · página {}/{} · {}",
            pagination.start_item(),
            pagination.end_item(),
            pagination.total,
            pagination.page,
            pagination.total_pages,
            query.sort.display_name()
        ));
    }

    for facet in &results.facets {
        let values: Vec<String> = facet
            .values
            .iter()
            .map(|v| {
                if v.selected {
                    format!("[{} ({})]", v.value, v.count)
                } else {
                    format!("{} ({})", v.value, v.count)
                }
            })
            .collect();
        if !values.is_empty() {
            ctx.output.kv(&facet.name, &values.join(", "));
        }
    }

    Ok(())
}

fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let sort = SortOption::parse(&args.sort).ok_or_else(|| {
        let options: Vec<String> = SortOption::ALL
            .iter()
            .map(|s| serde_json::to_value(s).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        anyhow!("Unknown sort '{}'. Options: {}", args.sort, options.join(", "))
    })?;

    let mut query = SearchQuery::new()
        .with_sort(sort)
        .with_pagination(args.page, args.per_page);

    if let Some(text) = &args.query {
        query = query.with_query(text.clone());
    }
    if let Some(brand) = &args.brand {
        query = query.with_filter(Filter::brand(brand.clone()));
    }
    if let Some(category) = &args.category {
        query = query.with_filter(Filter::category(category.clone()));
    }
    if args.min.is_some() || args.max.is_some() {
        query = query.with_filter(Filter::price_range(
            args.min.map(|reais| price_bound("--min", reais)).transpose()?,
            args.max.map(|reais| price_bound("--max", reais)).transpose()?,
        ));
    }
    if args.free_shipping {
        query = query.with_filter(Filter::FreeShipping);
    }
    if args.on_sale {
        query = query.with_filter(Filter::OnSale);
    }

    Ok(query)
}

fn price_bound(flag: &str, reais: i64) -> Result<Money> {
    Money::checked_from_reais(reais)
        .ok_or_else(|| anyhow!("Price {} {} is out of range", flag, reais))
}
