use serde::Serialize;
use serde::de::DeserializeOwned;

/// Message binds a name to its input and output types at compile time.
///
/// The implementing struct is the payload itself; `NAME` is the identifier
/// the bus dispatches on, `Output` is what its handler produces. A typo in
/// the name or a mismatched payload/result type is a compile error on the
/// typed API, not a runtime surprise.
///
/// # Example
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Greet {
///     name: String,
/// }
///
/// impl Message for Greet {
///     const NAME: &'static str = "demo.greet.v1";
///     type Output = String;
/// }
/// ```
///
/// # Trait bounds
/// - `Serialize` / `DeserializeOwned`: crossing the type-erased dispatch path
/// - `Send + Sync + 'static`: handlers run on a multi-threaded runtime and
///   the erased form lives in an `Arc`
pub trait Message: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier this message dispatches on. Must be unique per bus.
    const NAME: &'static str;

    /// What the registered handler produces for this message.
    type Output: Serialize + DeserializeOwned + Send + Sync + 'static;
}
