//! Procedural macros for remkit.

use proc_macro::TokenStream;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, ItemTrait, Meta, Token};

mod remote;

/// Marks a contract trait as remotely callable.
///
/// Leaves the trait untouched and records a contract registration in the
/// link-time manifest. Arguments:
/// - `name = "..."` — explicit external service name; omitted or empty means
///   "derive from the trait name".
/// - `transport = http | rmi | bincode | msgpack` — transport selection,
///   `http` by default.
///
/// ```ignore
/// #[remote(name = "orders", transport = rmi)]
/// pub trait OrderService {
///     fn place(&self, order_id: u64);
/// }
/// ```
#[proc_macro_attribute]
pub fn remote(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let item = parse_macro_input!(item as ItemTrait);
    remote::expand_remote(&args, &item).into()
}
