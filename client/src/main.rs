use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

mod api;
mod models;
mod session;

use api::Api;
use models::{Order, Restaurant};
use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "CLI client for the tiffin food-ordering API")]
struct Cli {
    /// GraphQL endpoint of the API server.
    #[arg(
        long,
        global = true,
        env = "TIFFIN_API",
        default_value = "http://localhost:4000/graphql"
    )]
    api: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session locally.
    Login { email: String, password: String },
    /// Drop the stored session.
    Logout,
    /// Show who is currently signed in.
    Whoami,
    /// List restaurants visible to you.
    Restaurants,
    /// Show one restaurant and its menu.
    Restaurant { id: String },
    #[command(subcommand)]
    Order(OrderCommand),
    #[command(subcommand)]
    Payment(PaymentCommand),
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// Place an order. Items are `<menuItemId>` or `<menuItemId>:<quantity>`.
    Create { items: Vec<String> },
    /// List your orders.
    List,
    /// Show one of your orders.
    Show { id: String },
    /// Pay for an order (manager or admin).
    Checkout { id: String },
    /// Cancel an order (manager or admin).
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Register a payment method (admin).
    Add { kind: String, details: String },
    /// List registered payment methods (admin).
    List,
    /// Remember a payment method for display on this machine.
    Select { id: String },
    /// Show the locally selected payment method id.
    Current,
}

fn parse_item(raw: &str) -> Result<(String, u32)> {
    match raw.split_once(':') {
        Some((id, quantity)) => {
            let quantity = quantity
                .parse()
                .with_context(|| format!("Invalid quantity in {raw:?}"))?;
            Ok((id.to_string(), quantity))
        }
        None => Ok((raw.to_string(), 1)),
    }
}

fn print_restaurant(restaurant: &Restaurant) {
    println!(
        "{}  {} [{}]",
        restaurant.id, restaurant.name, restaurant.country
    );
    for item in &restaurant.menu_items {
        println!("    {}  {}  ${:.2}", item.id, item.name, item.price);
    }
}

fn print_order(order: &Order) {
    println!(
        "{}  {}  [{}]",
        order.id,
        order.status,
        order.country.as_deref().unwrap_or("-")
    );
    for item in &order.items {
        println!("    {}  {} x{}", item.menu_item_id, item.name, item.quantity);
    }
}

fn authed(cli: &Cli) -> Result<Api> {
    let session = Session::require()?;
    Ok(Api::new(&cli.api, Some(session.access_token)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Login { email, password } => {
            let api = Api::new(&cli.api, None);
            let payload = api.login(email, password).await?;

            let session = Session {
                access_token: payload.access_token,
                user: payload.user,
            };
            session.save()?;

            println!(
                "Logged in as {} ({}{})",
                session.user.name,
                session.user.role,
                session
                    .user
                    .country
                    .as_deref()
                    .map(|c| format!(", {c}"))
                    .unwrap_or_default()
            );
        }
        Command::Logout => {
            Session::clear()?;
            println!("Logged out");
        }
        Command::Whoami => match Session::load()? {
            Some(session) => println!(
                "{} <{}> {} {}",
                session.user.name,
                session.user.email,
                session.user.role,
                session.user.country.as_deref().unwrap_or("-")
            ),
            None => println!("Not logged in"),
        },
        Command::Restaurants => {
            let restaurants = authed(&cli)?.restaurants().await?;
            for restaurant in &restaurants {
                print_restaurant(restaurant);
            }
        }
        Command::Restaurant { id } => {
            let restaurant = authed(&cli)?.restaurant(id).await?;
            print_restaurant(&restaurant);
        }
        Command::Order(order_command) => {
            let api = authed(&cli)?;
            match order_command {
                OrderCommand::Create { items } => {
                    if items.is_empty() {
                        bail!("Pass at least one <menuItemId>:<quantity> item");
                    }
                    let items = items
                        .iter()
                        .map(|raw| parse_item(raw))
                        .collect::<Result<Vec<_>>>()?;

                    let order = api.create_order(&items).await?;
                    println!("Created order {}", order.id);
                    print_order(&order);
                }
                OrderCommand::List => {
                    for order in &api.orders().await? {
                        print_order(order);
                    }
                }
                OrderCommand::Show { id } => print_order(&api.order(id).await?),
                OrderCommand::Checkout { id } => {
                    let order = api.checkout_order(id).await?;
                    println!("Order {} is now {}", order.id, order.status);
                }
                OrderCommand::Cancel { id } => {
                    let order = api.cancel_order(id).await?;
                    println!("Order {} is now {}", order.id, order.status);
                }
            }
        }
        Command::Payment(payment_command) => match payment_command {
            PaymentCommand::Add { kind, details } => {
                let method = authed(&cli)?.add_payment_method(kind, details).await?;
                println!("Added payment method {} ({})", method.id, method.kind);
            }
            PaymentCommand::List => {
                let selected = session::selected_payment_method()?;
                for method in &authed(&cli)?.payment_methods().await? {
                    let marker = if selected.as_deref() == Some(method.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {}  {}  {}", method.id, method.kind, method.details);
                }
            }
            PaymentCommand::Select { id } => {
                session::select_payment_method(id)?;
                println!("Selected payment method {id}");
            }
            PaymentCommand::Current => match session::selected_payment_method()? {
                Some(id) => println!("{id}"),
                None => println!("No payment method selected"),
            },
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_item;

    #[test]
    fn items_parse_with_and_without_quantity() {
        assert_eq!(parse_item("menu-1").unwrap(), ("menu-1".into(), 1));
        assert_eq!(parse_item("menu-1:3").unwrap(), ("menu-1".into(), 3));
        assert!(parse_item("menu-1:zero").is_err());
    }
}
