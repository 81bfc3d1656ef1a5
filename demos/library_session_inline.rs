use std::error::Error;

use invdesk::session::{Options, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(Options::default())?;

    // Fill the product form the way the interactive prompts would and
    // submit it; the session posts the draft, clears the form, and reloads
    // the product table.
    session.product_form.sku = "A1".to_string();
    session.product_form.name = "Widget".to_string();
    session.product_form.price = "9.5".to_string();
    session.product_form.stock = "3".to_string();
    session.product_form.category = "tools".to_string();

    match session.submit_product_form().await {
        Ok(()) => print!("{}", session.products.render()),
        Err(e) => eprintln!("create failed: {e}"),
    }

    Ok(())
}
