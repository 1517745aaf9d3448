//! Cart commands.

use anyhow::Result;
use rocket_cart::{CartError, CartStore, ProductId, UpdateProductAmount};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// Whether a command's cart operation succeeded. A failure has already been
/// shown to the user as a toast.
pub type Succeeded = bool;

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<Succeeded> {
    let store = ctx.open_store()?;
    ctx.output.cart(&store.cart().await);
    Ok(true)
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<Succeeded> {
    let store = ctx.open_store()?;
    let product_id = ProductId::new(args.product_id);

    let spinner = ctx.output.spinner(&format!("Checking stock for product {}", product_id));
    let result = store.add_product(product_id).await;
    spinner.finish_and_clear();

    finish(ctx, &store, result, &format!("Added product {}", product_id)).await
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<Succeeded> {
    let store = ctx.open_store()?;
    let product_id = ProductId::new(args.product_id);

    let result = store.remove_product(product_id).await;
    finish(ctx, &store, result, &format!("Removed product {}", product_id)).await
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<Succeeded> {
    let store = ctx.open_store()?;
    let update = UpdateProductAmount::new(ProductId::new(args.product_id), args.amount);

    let spinner = ctx
        .output
        .spinner(&format!("Checking stock for product {}", update.product_id));
    let result = store.update_product_amount(update).await;
    spinner.finish_and_clear();

    let message = if update.amount > 0 {
        format!("Product {} set to {}", update.product_id, update.amount)
    } else {
        format!("Ignored non-positive amount for product {}", update.product_id)
    };
    finish(ctx, &store, result, &message).await
}

async fn finish(
    ctx: &Context,
    store: &CartStore,
    result: Result<(), CartError>,
    success: &str,
) -> Result<Succeeded> {
    match result {
        Ok(()) => {
            ctx.output.success(success);
            if ctx.output.is_json() {
                ctx.output.cart(&store.cart().await);
            }
            Ok(true)
        }
        Err(e) => {
            ctx.output.debug(&format!("{} ({:?})", e, e.kind()));
            Ok(false)
        }
    }
}
