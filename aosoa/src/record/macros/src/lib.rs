mod record;

use proc_macro::TokenStream;

#[proc_macro_derive(Record)]
pub fn derive_record(item: TokenStream) -> TokenStream {
    record::derive_record(item)
}
