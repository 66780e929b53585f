use crate::utils::ensure_leading_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity] 宏实现
/// - 追加字段 `id: IdType`（若缺失，可见性与结构体一致）并置于字段最前
/// - 为目标结构体实现 `::blog_domain::entity::Entity`（`TABLE`、`id()`）
/// - 参数：`#[entity(id = IdType, table = "posts")]`；`id` 默认 `String`，`table` 默认结构体名的小写
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    let vis = st.vis.clone();
    ensure_leading_field(fields_named, &vis, "id", &id_type);

    let out_struct: ItemStruct = st;

    let ident = &out_struct.ident;
    let table = cfg
        .table
        .unwrap_or_else(|| ident.to_string().to_lowercase());
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::blog_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            const TABLE: &'static str = #table;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    table: Option<String>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            table: None,
        };
        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<EntityAttrElem, Token![,]> = Punctuated::parse_terminated(input)?;
        for elem in elems {
            match elem {
                EntityAttrElem::Id(ty) => {
                    if cfg.id_ty.replace(ty).is_some() {
                        return Err(input.error("duplicate key 'id' in attribute"));
                    }
                }
                EntityAttrElem::Table(name) => {
                    if cfg.table.replace(name).is_some() {
                        return Err(input.error("duplicate key 'table' in attribute"));
                    }
                }
            }
        }

        Ok(cfg)
    }
}

enum EntityAttrElem {
    Id(Type),
    Table(String),
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        if key == "id" {
            Ok(Self::Id(input.parse()?))
        } else if key == "table" {
            let lit: syn::LitStr = input.parse()?;
            Ok(Self::Table(lit.value()))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id' or 'table'",
            ))
        }
    }
}
