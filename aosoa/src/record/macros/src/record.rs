use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

pub fn derive_record(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the struct name we are annotating
    let struct_name = &ast.ident;

    // Schemas are derived per concrete type; a generic record has no single
    // field layout to describe.
    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &ast.generics,
            "Record cannot be derived for generic types",
        )
        .to_compile_error()
        .into();
    }

    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    struct_name,
                    "Record requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(struct_name, "Record can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(struct_name, "a record must have at least one field")
            .to_compile_error()
            .into();
    }

    let field_count = fields.len();
    let mut descriptors = Vec::with_capacity(field_count);
    let mut field_keys = Vec::with_capacity(field_count);
    let mut field_sizes = Vec::with_capacity(field_count);

    for (ordinal, field) in fields.iter().enumerate() {
        let ident = field.ident.as_ref().expect("named field");
        let ty = &field.ty;
        let ordinal = ordinal as u16;

        descriptors.push(quote! {
            ::aosoa::record::FieldDescriptor::new(
                ::aosoa::record::FieldId::new(#ordinal),
                ::core::stringify!(#ident),
                ::core::mem::offset_of!(#struct_name, #ident),
                ::core::mem::size_of::<#ty>(),
                ::core::mem::align_of::<#ty>(),
            )
        });

        // One typed key per field, named after the field in SCREAMING case.
        // These are the layout-safe replacement for pointers-to-members: the
        // only way to construct a `Field` is through this derive, which is
        // what makes the facade's typed casts sound.
        let key_name = syn::Ident::new(
            &ident.to_string().trim_start_matches("r#").to_uppercase(),
            ident.span(),
        );
        field_keys.push(quote! {
            pub const #key_name: ::aosoa::record::Field<#struct_name, #ty> =
                unsafe { ::aosoa::record::Field::new(::aosoa::record::FieldId::new(#ordinal)) };
        });

        field_sizes.push(quote! { ::core::mem::size_of::<#ty>() });
    }

    // Use ::aosoa::record::... which works both inside and outside the crate.
    // Inside the crate, this works because of `extern crate self as aosoa;` in lib.rs.
    // Outside the crate, this naturally resolves to the aosoa dependency.
    TokenStream::from(quote! {
        unsafe impl ::aosoa::record::Record for #struct_name {
            const FIELD_COUNT: usize = #field_count;

            fn fields() -> &'static [::aosoa::record::FieldDescriptor] {
                const FIELDS: &[::aosoa::record::FieldDescriptor] = &[ #(#descriptors),* ];
                FIELDS
            }
        }

        impl #struct_name {
            #(#field_keys)*
        }

        const _: () = ::core::assert!(
            ::core::mem::size_of::<#struct_name>() == 0usize #( + #field_sizes)*,
            "record type has interior padding; reorder fields or pad explicitly"
        );
    })
}
