use std::error::Error;

use invdesk::session::{Options, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(Options {
        base_url: "http://localhost:5000/api".to_string(),
        timeout_seconds: 5,
        ..Options::default()
    })?;

    let failures = session.bootstrap().await;
    for failure in failures.iter() {
        eprintln!("load failed: {failure}");
    }

    print!("{}", session.products.render());
    print!("{}", session.suppliers.render());
    print!("{}", session.orders.render());

    Ok(())
}
