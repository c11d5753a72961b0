use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{ItemFn, parse_macro_input};

/// Marks a function as a Tessera libc symbol override.
///
/// This attribute macro:
/// 1. Renames `fn foo` to `extern "C" fn tessera_foo`
/// 2. Exports it unmangled, under the bare name `foo` when the crate's
///    `interpose` feature is enabled and as `tessera_foo` otherwise
/// 3. Registers the symbol mapping `foo` -> `tessera_foo`
///
/// # Example
///
/// ```ignore
/// #[tessera_symbol]
/// pub unsafe fn getentropy(buffer: *mut libc::c_void, length: libc::size_t) -> libc::c_int {
///     // implementation
/// }
/// ```
///
/// Expands to:
///
/// ```ignore
/// #[cfg_attr(feature = "interpose", unsafe(export_name = "getentropy"))]
/// #[cfg_attr(not(feature = "interpose"), unsafe(no_mangle))]
/// pub unsafe extern "C" fn tessera_getentropy(buffer: *mut libc::c_void, length: libc::size_t) -> libc::c_int {
///     // implementation
/// }
///
/// #[linkme::distributed_slice(crate::symbols::TESSERA_SYMBOLS)]
/// static _TESSERA_SYM_GETENTROPY: (&str, crate::symbols::FnPtr) =
///     ("getentropy", crate::symbols::FnPtr(tessera_getentropy as *const ()));
/// ```
#[proc_macro_attribute]
pub fn tessera_symbol(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let attrs = &input.attrs;

    let original_name = &sig.ident;
    let tessera_name = format_ident!("tessera_{}", original_name);
    let symbol_name = original_name.to_string();
    let static_name = format_ident!(
        "_TESSERA_SYM_{}",
        original_name.to_string().to_uppercase()
    );

    let unsafety = &sig.unsafety;
    let inputs = &sig.inputs;
    let output = &sig.output;

    let expanded = quote! {
        #(#attrs)*
        #[cfg_attr(feature = "interpose", unsafe(export_name = #symbol_name))]
        #[cfg_attr(not(feature = "interpose"), unsafe(no_mangle))]
        #vis #unsafety extern "C" fn #tessera_name(#inputs) #output #block

        #[linkme::distributed_slice(crate::symbols::TESSERA_SYMBOLS)]
        static #static_name: (&str, crate::symbols::FnPtr) =
            (#symbol_name, crate::symbols::FnPtr(#tessera_name as *const ()));
    };

    TokenStream::from(expanded)
}
