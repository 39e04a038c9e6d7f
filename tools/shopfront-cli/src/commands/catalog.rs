//! Catalog browsing commands.

use anyhow::Result;
use shopfront_commerce::catalog::{Catalog, Product};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{price_label, product_badges, truncate, PRODUCT_COLUMNS};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command.unwrap_or(CatalogCommand::List {
        category: None,
        brand: None,
    }) {
        CatalogCommand::List { category, brand } => {
            list_products(&catalog, category.as_deref(), brand.as_deref(), ctx)
        }
        CatalogCommand::Show { product } => show_product(&catalog, &product, ctx),
        CatalogCommand::Category { slug } => match slug {
            Some(slug) => show_category(&catalog, &slug, ctx),
            None => list_categories(&catalog, ctx),
        },
        CatalogCommand::Brands => list_brands(&catalog, ctx),
    }
}

fn list_products(
    catalog: &Catalog,
    category: Option<&str>,
    brand: Option<&str>,
    ctx: &Context,
) -> Result<()> {
    if let Some(slug) = category {
        // Fail early on an unknown category instead of printing nothing.
        catalog.category(slug)?;
    }

    let products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| category.map_or(true, |c| p.in_category(c)))
        .filter(|p| brand.map_or(true, |b| p.brand.eq_ignore_ascii_case(b)))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("{} ({} produtos)", ctx.config.store.name, products.len()));
    print_product_table(&products, ctx);
    Ok(())
}

pub(crate) fn print_product_table(products: &[&Product], ctx: &Context) {
    if products.is_empty() {
        ctx.output.info("Nenhum produto encontrado.");
        return;
    }

    ctx.output.table_row(&["ID", "PRODUTO", "PREÇO", ""], &PRODUCT_COLUMNS);
    for product in products {
        let name = truncate(&product.name, PRODUCT_COLUMNS[1]);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &name,
                &product.price.display(),
                &product_badges(product),
            ],
            &PRODUCT_COLUMNS,
        );
    }
}

fn show_product(catalog: &Catalog, id_or_slug: &str, ctx: &Context) -> Result<()> {
    let product = catalog.product(id_or_slug)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Marca", &product.brand);
    ctx.output.kv("Preço", &price_label(product));
    if let Some(off) = product.discount_percentage() {
        ctx.output.kv("Desconto", &format!("{}%", off));
    }
    let badges = product_badges(product);
    if !badges.is_empty() {
        ctx.output.kv("Destaques", &badges);
    }
    if !product.colors.is_empty() {
        ctx.output.kv("Cores", &product.colors.join(", "));
    }
    if !product.storage.is_empty() {
        ctx.output.kv("Armazenamento", &product.storage.join(", "));
    }
    if let Some(description) = &product.description {
        ctx.output.line("");
        ctx.output.line(description);
    }

    Ok(())
}

fn show_category(catalog: &Catalog, slug: &str, ctx: &Context) -> Result<()> {
    let category = catalog.category(slug)?;
    let products = catalog.by_category(&category.slug);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "category": category,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&category.name);
    if let Some(description) = &category.description {
        ctx.output.line(description);
    }
    print_product_table(&products, ctx);
    Ok(())
}

fn list_categories(catalog: &Catalog, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&catalog.categories());
        return Ok(());
    }

    ctx.output.header("Categorias");
    for category in catalog.categories() {
        let count = catalog.by_category(&category.slug).len();
        ctx.output
            .list_item(&format!("{} ({}) - {} produtos", category.name, category.slug, count));
    }
    Ok(())
}

fn list_brands(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let brands = catalog.brands();

    if ctx.output.is_json() {
        ctx.output.json(&brands);
        return Ok(());
    }

    ctx.output.header("Marcas");
    for brand in brands {
        let count = catalog.by_brand(brand).len();
        ctx.output.list_item(&format!("{} ({})", brand, count));
    }
    Ok(())
}
