//! Checkout commands: totals, CEP lookup and the WhatsApp handoff.

use anyhow::{anyhow, bail, Result};
use dialoguer::{Input, Select};
use shopfront_commerce::cart::{Cart, CartPricing};
use shopfront_commerce::checkout::{
    AutofillTask, CheckoutFlow, PaymentPreference, PostalCode, ShippingMethod,
};
use shopfront_commerce::customer::IdentityProvider;

use super::{CheckoutArgs, CheckoutCommand, SendArgs};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CheckoutCommand::Quote { coupon, shipping } => {
            quote(coupon.as_deref(), shipping.as_deref(), ctx)
        }
        CheckoutCommand::Cep { code } => lookup_cep(&code, ctx).await,
        CheckoutCommand::Send(args) => send(args, ctx).await,
    }
}

fn parse_shipping(name: &str) -> Result<ShippingMethod> {
    ShippingMethod::parse(name)
        .ok_or_else(|| anyhow!("Unknown shipping method '{}'. Options: pac, sedex", name))
}

fn parse_payment(name: &str) -> Result<PaymentPreference> {
    PaymentPreference::parse(name)
        .ok_or_else(|| anyhow!("Unknown payment '{}'. Options: pix, cartao, boleto", name))
}

fn quote(coupon: Option<&str>, shipping: Option<&str>, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    let cart = store.cart();
    if cart.is_empty() {
        bail!("The cart is empty");
    }

    let coupons = ctx.coupons();
    let coupon = coupon.map(|code| coupons.redeem(code)).transpose()?;
    let method = shipping.map(parse_shipping).transpose()?.unwrap_or(ShippingMethod::Pac);

    let quotes = ctx.config.shipping.quotes(cart);
    let selected = ctx.config.shipping.quote(method, cart);
    let pricing = CartPricing::compute(cart, coupon, selected.price);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "pricing": pricing,
            "shipping": selected,
            "options": quotes,
        }));
        return Ok(());
    }

    ctx.output.header("Resumo do pedido");
    print_pricing(&pricing, ctx);
    ctx.output.line("");
    ctx.output.info("Opções de frete:");
    for quote in &quotes {
        let marker = if quote.method == method { "›" } else { " " };
        ctx.output.list_item(&format!("{} {}", marker, quote.label()));
    }
    Ok(())
}

fn print_pricing(pricing: &CartPricing, ctx: &Context) {
    ctx.output.kv("Itens", &pricing.item_count.to_string());
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if let Some(code) = pricing.coupon_code.as_deref().filter(|_| pricing.has_discount()) {
        ctx.output
            .kv(&format!("Cupom {}", code), &format!("-{}", pricing.discount.display()));
    }
    let shipping = if pricing.free_shipping() {
        "Grátis".to_string()
    } else {
        pricing.shipping.display()
    };
    ctx.output.kv("Frete", &shipping);
    ctx.output.kv("Total", &pricing.total.display());
}

async fn lookup_cep(input: &str, ctx: &Context) -> Result<()> {
    let code = PostalCode::parse(input)?;
    let lookup = ctx.postal_lookup();

    let spinner = ctx.output.spinner(&format!("Buscando CEP {}...", code));
    let result = lookup.lookup(&code).await;
    spinner.finish_and_clear();
    let found = result?;

    if ctx.output.is_json() {
        ctx.output.json(&found);
        return Ok(());
    }

    ctx.output.header(&format!("CEP {}", found.postal_code));
    ctx.output.kv("Rua", &found.street);
    if let Some(complement) = &found.complement {
        ctx.output.kv("Complemento", complement);
    }
    ctx.output.kv("Bairro", &found.neighborhood);
    ctx.output.kv("Cidade", &format!("{}/{}", found.city, found.state));
    Ok(())
}

async fn send(args: SendArgs, ctx: &Context) -> Result<()> {
    let handoff = ctx.handoff()?;
    let store = ctx.cart_store()?;
    let cart = store.cart();

    let mut flow = CheckoutFlow::new();
    flow.prefill(&ctx.identity().current());
    flow.advance(cart)?;

    // Start the CEP lookup while the contact details are collected.
    let autofill = match args.cep.as_deref() {
        Some(cep) => Some(AutofillTask::spawn(ctx.postal_lookup(), PostalCode::parse(cep)?)),
        None => None,
    };

    fill_contact(&mut flow, &args)?;
    flow.advance(cart)?;

    if let Some(task) = autofill {
        let spinner = ctx.output.spinner(&format!("Buscando CEP {}...", task.code()));
        let code = task.code().clone();
        let found = task.finish().await;
        spinner.finish_and_clear();
        match found {
            Some(found) => flow.apply_postal_lookup(&found),
            None => {
                ctx.output
                    .warn(&format!("CEP {} não encontrado; preencha o endereço.", code));
                flow.address.postal_code = code.display();
            }
        }
    }
    fill_address(&mut flow, &args)?;

    let method = match args.shipping.as_deref() {
        Some(name) => parse_shipping(name)?,
        None if args.interactive => prompt_shipping(cart, ctx)?,
        None => ShippingMethod::Pac,
    };
    flow.select_shipping(ctx.config.shipping.quote(method, cart));
    flow.set_payment(parse_payment(&args.payment)?);

    if let Some(code) = &args.coupon {
        flow.apply_coupon(&ctx.coupons(), code)?;
    }
    if let Some(notes) = &args.notes {
        flow.set_notes(notes.clone());
    }

    flow.advance(cart)?;

    let summary = flow.summary(cart, &ctx.config.store.name);
    let link = flow.hand_off(cart, &handoff, &ctx.config.store.name)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": summary,
            "link": link,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Pedido {}", summary.order_ref));
    print_pricing(&summary.pricing, ctx);
    ctx.output.line("");
    ctx.output.line(&summary.message());
    ctx.output.line("");
    ctx.output.success("Abra o link para enviar o pedido pelo WhatsApp:");
    ctx.output.line(&link);
    ctx.output.info("O carrinho foi mantido; esvazie com `shopfront cart clear` após a confirmação.");
    Ok(())
}

fn fill_contact(flow: &mut CheckoutFlow, args: &SendArgs) -> Result<()> {
    let contact = &mut flow.contact;
    if let Some(name) = &args.name {
        contact.name = name.clone();
    }
    if let Some(phone) = &args.phone {
        contact.phone = phone.clone();
    }
    if let Some(email) = &args.email {
        contact.email = Some(email.clone());
    }

    if args.interactive {
        contact.name = prompt("Nome", &contact.name, false)?;
        contact.phone = prompt("Telefone", &contact.phone, false)?;
        let email = prompt("E-mail", contact.email.as_deref().unwrap_or(""), true)?;
        contact.email = Some(email).filter(|e| !e.is_empty());
    }
    Ok(())
}

fn fill_address(flow: &mut CheckoutFlow, args: &SendArgs) -> Result<()> {
    let address = &mut flow.address;
    let fields: [(&Option<String>, &mut String); 5] = [
        (&args.street, &mut address.street),
        (&args.number, &mut address.number),
        (&args.neighborhood, &mut address.neighborhood),
        (&args.city, &mut address.city),
        (&args.state, &mut address.state),
    ];
    for (given, field) in fields {
        if let Some(value) = given {
            *field = value.clone();
        }
    }
    if let Some(complement) = &args.complement {
        address.complement = Some(complement.clone());
    }

    if args.interactive {
        address.postal_code = prompt("CEP", &address.postal_code, false)?;
        address.street = prompt("Rua", &address.street, false)?;
        address.number = prompt("Número", &address.number, false)?;
        let complement = prompt("Complemento", address.complement.as_deref().unwrap_or(""), true)?;
        address.complement = Some(complement).filter(|c| !c.is_empty());
        address.neighborhood = prompt("Bairro", &address.neighborhood, false)?;
        address.city = prompt("Cidade", &address.city, false)?;
        address.state = prompt("UF", &address.state, false)?;
    }
    Ok(())
}

fn prompt(label: &str, current: &str, optional: bool) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(optional);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

fn prompt_shipping(cart: &Cart, ctx: &Context) -> Result<ShippingMethod> {
    let quotes = ctx.config.shipping.quotes(cart);
    let items: Vec<String> = quotes.iter().map(|q| q.label()).collect();
    let selection = Select::new()
        .with_prompt("Frete")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(quotes[selection].method)
}
