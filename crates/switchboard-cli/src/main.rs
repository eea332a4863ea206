use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use switchboard_core::{Bus, BusError, Handler, Message};

#[derive(Debug, Serialize, Deserialize)]
struct Greet {
    name: String,
}

impl Message for Greet {
    const NAME: &'static str = "demo.greet.v1";
    type Output = String;
}

struct GreetHandler;

#[async_trait]
impl Handler<Greet> for GreetHandler {
    async fn handle(&self, message: Greet) -> Result<String, BusError> {
        Ok(format!("Hello, {}!", message.name))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Divide {
    a: i64,
    b: i64,
}

impl Message for Divide {
    const NAME: &'static str = "demo.divide.v1";
    type Output = i64;
}

#[tokio::main]
async fn main() -> Result<(), BusError> {
    // RUST_LOG=debug shows per-registration and per-dispatch events.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // (A) Build an empty bus and chain registrations: a struct handler for
    //     "greet", a closure for "divide".
    let bus = Bus::new();
    bus.handle::<Greet, _>(GreetHandler)?
        .handle_fn::<Divide, _, _>(|message: Divide| async move {
            if message.b == 0 {
                return Err(BusError::handler("division by zero"));
            }
            Ok(message.a / message.b)
        })?;

    // (B) Typed execution: payload and result types are checked at compile
    //     time against each message's declaration.
    let greeting = bus
        .execute(Greet {
            name: "switchboard".to_string(),
        })
        .await?;
    println!("{greeting}");

    let quotient = bus.execute(Divide { a: 10, b: 2 }).await?;
    println!("10 / 2 = {quotient}");

    // (C) A second registration for an existing name is rejected; the first
    //     handler stays bound.
    if let Err(e) = bus.handle::<Greet, _>(GreetHandler) {
        println!("re-registration rejected: {e}");
    }

    // (D) Handler failures reach the caller unchanged.
    if let Err(e) = bus.execute(Divide { a: 10, b: 0 }).await {
        println!("10 / 0 rejected: {e}");
    }

    // (E) Unregistered names are rejected before any handler runs. This is
    //     the dynamic surface: dispatch by name with a JSON payload.
    if let Err(e) = bus
        .execute_value("demo.unknown.v1", serde_json::json!({}))
        .await
    {
        println!("unknown message rejected: {e}");
    }

    Ok(())
}
