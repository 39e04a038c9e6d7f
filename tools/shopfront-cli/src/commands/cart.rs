//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shopfront_cache::FileStore;
use shopfront_commerce::cart::{CartStore, MAX_QUANTITY_PER_LINE};
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{line_label, money_cell, truncate, CART_COLUMNS};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            product,
            qty,
            color,
            storage,
            variant_line,
        } => {
            let catalog = ctx.catalog()?;
            let product = catalog.product(&product)?;
            check_variant("cor", color.as_deref(), &product.colors)?;
            check_variant("armazenamento", storage.as_deref(), &product.storage)?;

            let item = if variant_line {
                product.to_variant_cart_item(color.as_deref(), storage.as_deref())
            } else {
                product.to_cart_item(color.as_deref(), storage.as_deref())
            };
            if cart.add(item, qty) {
                ctx.output
                    .success(&format!("{}x {} adicionado ao carrinho", qty, product.name));
            } else {
                ctx.output.warn(&format!(
                    "{} já está no limite de {} unidades",
                    product.name, MAX_QUANTITY_PER_LINE
                ));
            }
        }
        CartCommand::Remove { id } => {
            let id = line_id(&cart, &id, ctx)?;
            cart.remove(&id);
            ctx.output.success(&format!("{} removido", id));
        }
        CartCommand::Inc { id, by } => {
            let id = line_id(&cart, &id, ctx)?;
            cart.increase(&id, by);
        }
        CartCommand::Dec { id, by } => {
            let id = line_id(&cart, &id, ctx)?;
            cart.decrease(&id, by);
        }
        CartCommand::Set { id, quantity } => {
            let id = line_id(&cart, &id, ctx)?;
            cart.set_quantity(&id, quantity);
        }
        CartCommand::Clear { yes } => {
            if cart.cart().is_empty() {
                ctx.output.info("O carrinho já está vazio.");
                return Ok(());
            }
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remover {} itens do carrinho?", cart.item_count()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Cancelado");
                    return Ok(());
                }
            }
            cart.clear();
            ctx.output.success("Carrinho esvaziado");
        }
    }

    if let Some(err) = cart.last_persist_error() {
        ctx.output
            .warn(&format!("O carrinho não pôde ser salvo: {}", err));
    }

    show_cart(&cart, ctx);
    Ok(())
}

/// Print the cart contents and derived totals.
pub(crate) fn show_cart(cart: &CartStore<FileStore>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": cart.lines(),
            "itemCount": cart.item_count(),
            "subtotal": cart.subtotal(),
            "freeShippingEligible": cart.free_shipping_eligible(),
        }));
        return;
    }

    ctx.output.header("Carrinho");
    if cart.cart().is_empty() {
        ctx.output.info("Seu carrinho está vazio.");
        return;
    }

    ctx.output.table_row(&["PRODUTO", "QTD", "UNITÁRIO", "TOTAL"], &CART_COLUMNS);
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                &truncate(&line_label(line), CART_COLUMNS[0]),
                &line.quantity.to_string(),
                &money_cell(line.item.unit_price),
                &money_cell(line.total()),
            ],
            &CART_COLUMNS,
        );
        ctx.output.debug(&format!("id: {}", line.id()));
    }

    ctx.output.line("");
    ctx.output.kv("Itens", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &cart.subtotal().display());
    if cart.free_shipping_eligible() {
        ctx.output.kv("Frete", "grátis (PAC)");
    }
}

/// Resolve what the user typed to a line id: an exact line id, or the id or
/// slug of a catalog product in the cart.
fn line_id(cart: &CartStore<FileStore>, input: &str, ctx: &Context) -> Result<ProductId> {
    let exact = ProductId::new(input.trim());
    if cart.cart().line(&exact).is_some() {
        return Ok(exact);
    }

    let catalog: Catalog = ctx.catalog()?;
    if let Ok(product) = catalog.product(input) {
        let matching: Vec<&ProductId> = cart
            .lines()
            .iter()
            .map(|l| l.id())
            .filter(|id| id.base() == product.id)
            .collect();
        match matching.as_slice() {
            [id] => return Ok((*id).clone()),
            [] => {}
            _ => bail!(
                "{} has several lines in the cart; use one of: {}",
                product.name,
                matching.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    bail!("No cart line matches '{}'", input)
}

fn check_variant(label: &str, chosen: Option<&str>, offered: &[String]) -> Result<()> {
    match chosen {
        Some(value) if !offered.is_empty() && !offered.iter().any(|o| o.eq_ignore_ascii_case(value)) => {
            bail!("Invalid {} '{}'. Options: {}", label, value, offered.join(", "))
        }
        _ => Ok(()),
    }
}
