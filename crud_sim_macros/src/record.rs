use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    // #[record(collection = "...")] on the struct
    let collection = match extract_collection(&input) {
        Ok(collection) => collection,
        Err(err) => return err.to_compile_error().into(),
    };

    // #[record(id)] on a field, or a field named `id`
    let id_field = match extract_id_field(name, &fields) {
        Ok(ident) => ident,
        Err(err) => return err.to_compile_error().into(),
    };

    let search_fields = match extract_search_fields(&fields) {
        Ok(idents) => idents,
        Err(err) => return err.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics crud_sim::Record for #name #ty_generics #where_clause {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> ::core::option::Option<&str> {
                self.#id_field.as_deref()
            }

            fn set_id(&mut self, id: ::std::string::String) {
                self.#id_field = ::core::option::Option::Some(id);
            }

            fn search_fields(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![#( ::core::convert::AsRef::<str>::as_ref(&self.#search_fields) ),*]
            }
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<Field>> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields.named.iter().cloned().collect());
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Record can only be derived for structs with named fields",
    ))
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `collection = \"...\"`"))
            }
        })?;

        if let Some(c) = collection {
            return Ok(c);
        }
    }

    // Default: snake_case struct name + "s"
    Ok(format!("{}s", to_snake_case(&input.ident.to_string())))
}

/// Reads the flags set by `#[record(...)]` on a field.
fn field_flags(field: &Field) -> syn::Result<(bool, bool)> {
    let mut is_id = false;
    let mut is_search = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                is_id = true;
                Ok(())
            } else if meta.path.is_ident("search") {
                is_search = true;
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `id` or `search`"))
            }
        })?;
    }
    Ok((is_id, is_search))
}

fn extract_id_field(name: &Ident, fields: &[Field]) -> syn::Result<Ident> {
    for field in fields {
        let (is_id, _) = field_flags(field)?;
        if is_id {
            if let Some(ident) = &field.ident {
                return Ok(ident.clone());
            }
        }
    }

    for field in fields {
        if let Some(ident) = &field.ident {
            if ident == "id" {
                return Ok(ident.clone());
            }
        }
    }

    Err(syn::Error::new_spanned(
        name,
        "Record derive: no field marked with #[record(id)] and no field named `id`",
    ))
}

fn extract_search_fields(fields: &[Field]) -> syn::Result<Vec<Ident>> {
    let mut idents = Vec::new();
    for field in fields {
        let (_, is_search) = field_flags(field)?;
        if is_search {
            if let Some(ident) = &field.ident {
                idents.push(ident.clone());
            }
        }
    }
    Ok(idents)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
